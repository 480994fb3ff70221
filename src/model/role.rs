use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Engineer = 1,
    Manager = 2,
    Director = 3,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Engineer),
            2 => Some(Role::Manager),
            3 => Some(Role::Director),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Human-readable label shown in the dashboard header and the role picker.
    pub fn label(self) -> &'static str {
        match self {
            Role::Engineer => "Engineer",
            Role::Manager => "Manager",
            Role::Director => "Director",
        }
    }

    /// Short description of what the role works with.
    pub fn description(self) -> &'static str {
        match self {
            Role::Engineer => "Works on tasks, technical implementation",
            Role::Manager => "Manages projects, coordinates the team",
            Role::Director => "Oversight, reporting, decision making",
        }
    }
}
