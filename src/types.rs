use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    Login,
    Register,
    Home,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl AuthUser {
    /// First word of the display name, for greeting text.
    pub fn first_name(&self) -> &str {
        self.display_name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or("Atleta")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub id_token: String,
    pub user: AuthUser,
}

/// One row of the linked spreadsheet after mapping. `day` is inherited from
/// the nearest preceding non-blank day cell; the other fields keep the raw
/// cell text and are parsed ad hoc where needed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub day: String,
    pub name: String,
    pub target: String,
    pub preset_weight: String,
    pub preset_rest: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    pub reps: u32,
    pub rpe: u8,
    pub weight: String,
}
