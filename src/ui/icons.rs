use crate::saved_search::OwnerKind;

pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
    pub const ORG: &str = "🏢";
    pub const BELL: &str = "🔔";
    pub const DEL: &str = "🗑️";
    pub const MOD: &str = "📝";
    pub const NEW: &str = "✨";

    pub fn owner(kind: OwnerKind) -> &'static str {
        match kind {
            OwnerKind::User => Self::PERSON,
            OwnerKind::Org => Self::ORG,
        }
    }
}
