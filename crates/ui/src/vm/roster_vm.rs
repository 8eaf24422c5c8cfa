use services::RosterEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterRowVm {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub xp: u32,
    pub progress_percent: u8,
    pub status: &'static str,
    pub graduated: bool,
}

impl From<&RosterEntry> for RosterRowVm {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            uid: entry.uid.to_string(),
            name: entry.name.clone(),
            email: entry.email.clone(),
            xp: entry.xp,
            progress_percent: entry.progress_percent,
            status: entry.status_label(),
            graduated: entry.graduated,
        }
    }
}

impl RosterRowVm {
    #[must_use]
    pub fn status_class(&self) -> &'static str {
        if self.graduated {
            "status status-graduate"
        } else {
            "status status-learning"
        }
    }

    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.progress_percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterVm {
    pub rows: Vec<RosterRowVm>,
    pub graduates: usize,
}

impl RosterVm {
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} students, {} graduated", self.rows.len(), self.graduates)
    }
}

#[must_use]
pub fn map_roster(entries: &[RosterEntry]) -> RosterVm {
    let rows: Vec<RosterRowVm> = entries.iter().map(RosterRowVm::from).collect();
    let graduates = rows.iter().filter(|row| row.graduated).count();
    RosterVm { rows, graduates }
}
