//! Authorization actions for Casbin enforcement.

/// Actions a caller can attempt on a group.
///
/// These are used as the `act` parameter in Casbin enforcement requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read the group and its projects.
    View,
    /// Change project content inside the group.
    Edit,
    /// Rename the group or manage its members.
    Danger,
}

impl Action {
    /// Returns the Casbin action string for this action.
    #[must_use]
    pub const fn as_casbin_action(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_casbin_action())
    }
}
