/// what to do with a vertex pair that has no path between its endpoints
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnreachablePolicy {

    /// abort the computation with `RoutingError::Unreachable`
    #[default]
    Error,

    /// keep the pair at `INFINITY` / `NO_NEXT_HOP` and carry on
    Sentinel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoutingConfig {
    pub unreachable: UnreachablePolicy,
}

impl RoutingConfig {

    pub fn allow_unreachable() -> Self {
        RoutingConfig {
            unreachable: UnreachablePolicy::Sentinel,
        }
    }
}
