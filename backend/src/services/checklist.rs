//! Personalised Sabbath preparation checklist.

use serde::{Deserialize, Serialize};

use crate::models::SabbathPreferences;

const SPIRITUAL: &[&str] = &[
    "Review the week's blessings and answered prayers",
    "Study the Sabbath School lesson",
    "Prepare special Bible readings or devotionals",
    "Set aside time for family worship",
];

const PHYSICAL: &[&str] = &[
    "Clean and tidy the home",
    "Prepare Sabbath meals in advance",
    "Set out Sabbath clothes",
    "Personal grooming and preparation",
];

const SERVICE: &[&str] = &[
    "Prepare materials for church responsibilities",
    "Plan acts of service or visitation",
    "Coordinate with church family as needed",
];

const MEAL_PREP: &[&str] = &["Plan Sabbath meals", "Grocery shopping", "Cook and prepare food"];

const FAMILY_WORSHIP: &[&str] = &[
    "Choose worship songs",
    "Prepare family discussion topics",
    "Set up worship space",
];

const OUTREACH: &[&str] = &[
    "Prepare outreach materials",
    "Contact potential visitors",
    "Arrange transportation if needed",
];

/// Preparation tasks grouped by category, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparationChecklist {
    pub spiritual: Vec<String>,
    pub physical: Vec<String>,
    pub service: Vec<String>,
    pub custom: Vec<String>,
}

impl PreparationChecklist {
    /// Build the checklist for a user's preferences.
    pub fn for_preferences(preferences: &SabbathPreferences) -> Self {
        let mut spiritual = owned(SPIRITUAL);
        let mut physical = owned(PHYSICAL);
        let mut service = owned(SERVICE);

        if preferences.meal_prep {
            physical.extend(owned(MEAL_PREP));
        }
        if preferences.family_worship {
            spiritual.extend(owned(FAMILY_WORSHIP));
        }
        if preferences.outreach {
            service.extend(owned(OUTREACH));
        }

        Self {
            spiritual,
            physical,
            service,
            custom: preferences.custom_tasks.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.spiritual.len() + self.physical.len() + self.service.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(category, task)` pairs in display order.
    pub fn items(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        section("spiritual", &self.spiritual)
            .chain(section("physical", &self.physical))
            .chain(section("service", &self.service))
            .chain(section("custom", &self.custom))
    }
}

fn section<'a>(
    name: &'static str,
    tasks: &'a [String],
) -> impl Iterator<Item = (&'static str, &'a str)> + 'a {
    tasks.iter().map(move |task| (name, task.as_str()))
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
