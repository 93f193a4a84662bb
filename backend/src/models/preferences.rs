use serde::{Deserialize, Serialize};

/// Per-user Sabbath preferences as kept by the profile store.
///
/// Every field is optional in the stored JSON; missing values take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SabbathPreferences {
    /// Local hour on Friday when preparation starts (0-23)
    #[serde(default = "default_preparation_start_hour")]
    pub preparation_start_hour: u32,
    /// How long before preparation starts the reminder becomes due
    #[serde(default = "default_notification_hours_before")]
    pub notification_hours_before: u32,
    #[serde(default)]
    pub meal_prep: bool,
    #[serde(default)]
    pub family_worship: bool,
    #[serde(default)]
    pub outreach: bool,
    #[serde(default)]
    pub custom_tasks: Vec<String>,
}

pub(crate) fn default_preparation_start_hour() -> u32 {
    14
}

pub(crate) fn default_notification_hours_before() -> u32 {
    24
}

impl Default for SabbathPreferences {
    fn default() -> Self {
        Self {
            preparation_start_hour: default_preparation_start_hour(),
            notification_hours_before: default_notification_hours_before(),
            meal_prep: false,
            family_worship: false,
            outreach: false,
            custom_tasks: Vec::new(),
        }
    }
}

/// The slice of a user profile the clock consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSabbathProfile {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default, rename = "sabbath_preferences")]
    pub preferences: SabbathPreferences,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl UserSabbathProfile {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
            preferences: SabbathPreferences::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: SabbathPreferences) -> Self {
        self.preferences = preferences;
        self
    }
}
