/// this module contains the data structures shared by the shortest path search and the routing table

use std::ops::Index;

/// ValidFlags stores one value per index and can invalidate all of them in O(1)
/// by bumping the current flag instead of rewriting the whole array.
/// invalid entries read as the default value
#[derive(Clone, Debug)]
pub struct ValidFlags<T: Copy> {
    valid_flags: Vec<usize>,
    valid_flag: usize,
    default_value: T,
    data: Vec<T>
}

impl<T: Copy> Index<usize> for ValidFlags<T> {

    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        if self.is_valid(index) {
            &self.data[index]
        }
        else {
            &self.default_value
        }
    }
}

impl<T: Copy> ValidFlags<T> {

    pub fn new(size: usize, default_value: T) -> Self {
        ValidFlags {
            valid_flags: vec![0; size],
            valid_flag: 1,
            default_value,
            data: vec![default_value; size]
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.valid_flags[index] == self.valid_flag
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
        self.valid_flags[index] = self.valid_flag;
    }

    pub fn reset(&mut self) {
        if self.valid_flag == usize::MAX {
            // flag space exhausted, start over with a clean array
            self.valid_flag = 1;
            self.valid_flags.iter_mut().for_each(|flag| *flag = 0);
        }
        else {
            self.valid_flag += 1;
        }
    }
}

/// stores a 2d matrix inside a single row-major 1d array
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T: Copy> {
    pub data: Vec<T>,

    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {

    pub fn new(rows: usize, cols: usize, initial_value: T) -> Self {
        Matrix {
            data: vec![initial_value; rows * cols],
            rows,
            cols
        }
    }

    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let cols = rows.first().map_or(0, |row| row.len());

        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }

        Some(Matrix {
            data: rows.concat(),
            rows: rows.len(),
            cols
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[(row * self.cols)..((row + 1) * self.cols)]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        &mut self.data[(row * self.cols)..((row + 1) * self.cols)]
    }

    /// overwrites the given row with the same row of `source`. both matrices need the same number of columns
    pub fn copy_row_from(&mut self, row: usize, source: &Matrix<T>) {
        self.row_mut(row).copy_from_slice(source.row(row));
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }
}
