//! User profile model.

use serde::{Deserialize, Serialize};

/// The signed-in user's profile as served by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub onboarding_completed: bool,
}
