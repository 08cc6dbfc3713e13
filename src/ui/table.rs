use tabled::{settings::Style, Table, Tabled};
use crate::saved_search::SavedQuery;
use crate::vcs::ContributorCount;

#[derive(Tabled)]
pub struct SavedSearchRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Query")]
    pub query: String,
    #[tabled(rename = "Owner")]
    pub owner: String,
    #[tabled(rename = "Notify")]
    pub notify: String,
}

impl From<&SavedQuery> for SavedSearchRow {
    fn from(sq: &SavedQuery) -> Self {
        let notify = match (sq.notify, sq.notify_slack) {
            (true, true) => "email, slack",
            (true, false) => "email",
            (false, true) => "slack",
            (false, false) => "-",
        };
        Self {
            id: sq.id.to_string(),
            description: sq.description.clone(),
            query: sq.query.clone(),
            owner: sq.owner.to_string(),
            notify: notify.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct ContributorRow {
    #[tabled(rename = "Commits")]
    pub count: u32,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
}

pub fn saved_searches_table(saved: &[SavedQuery]) -> String {
    if saved.is_empty() {
        return String::new();
    }
    let rows: Vec<SavedSearchRow> = saved.iter().map(SavedSearchRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn contributors_table(counts: &[ContributorCount]) -> String {
    if counts.is_empty() {
        return String::new();
    }
    let rows: Vec<ContributorRow> = counts
        .iter()
        .map(|c| ContributorRow {
            count: c.count,
            name: c.name.clone(),
            email: c.email.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
