//! Static dashboard content and the side navigation's local highlight

pub const APP_TITLE: &str = "Medical Electronic Application System";
pub const DASHBOARD_TITLE: &str = "Dashboard";
pub const DASHBOARD_SUBTITLE: &str =
    "Overview of the system and the latest application activity.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stat {
    pub name: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplicationStatus {
    UnderReview,
    Approved,
}

impl ApplicationStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::UnderReview => "Under review",
            ApplicationStatus::Approved => "Approved",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecentApplication {
    pub number: &'static str,
    pub institution: &'static str,
    pub application_type: &'static str,
    pub status: ApplicationStatus,
    pub submitted_on: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat {
        name: "Registered institutions",
        value: "1,234",
        change: "+12%",
        trend: Trend::Positive,
    },
    Stat {
        name: "Applications (this month)",
        value: "567",
        change: "+8%",
        trend: Trend::Positive,
    },
    Stat {
        name: "Approved applications",
        value: "456",
        change: "+15%",
        trend: Trend::Positive,
    },
    Stat {
        name: "Pending applications",
        value: "89",
        change: "-5%",
        trend: Trend::Negative,
    },
];

pub const RECENT_APPLICATIONS: [RecentApplication; 2] = [
    RecentApplication {
        number: "APP-12345678",
        institution: "Tokyo General Hospital",
        application_type: "New practice notification",
        status: ApplicationStatus::UnderReview,
        submitted_on: "2024-01-15",
    },
    RecentApplication {
        number: "APP-87654321",
        institution: "Aoyama Internal Medicine Clinic",
        application_type: "Renewal application",
        status: ApplicationStatus::Approved,
        submitted_on: "2024-01-10",
    },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavSection {
    #[default]
    Dashboard,
    Institutions,
    Applications,
    Users,
}

impl NavSection {
    pub const ALL: [NavSection; 4] = [
        NavSection::Dashboard,
        NavSection::Institutions,
        NavSection::Applications,
        NavSection::Users,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavSection::Dashboard => "Dashboard",
            NavSection::Institutions => "Institution Management",
            NavSection::Applications => "Application Management",
            NavSection::Users => "User Management",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            NavSection::Dashboard | NavSection::Users => "#",
            NavSection::Institutions => "/institutions",
            NavSection::Applications => "/applications",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub section: NavSection,
    pub label: &'static str,
    pub href: &'static str,
    pub current: bool,
}

/// Which side-panel entry is highlighted. Purely local: it follows clicks,
/// not the page actually shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    active: NavSection,
}

impl NavState {
    pub fn active(&self) -> NavSection {
        self.active
    }

    pub fn select(self, section: NavSection) -> Self {
        Self { active: section }
    }

    pub fn items(&self) -> Vec<NavItem> {
        NavSection::ALL
            .into_iter()
            .map(|section| NavItem {
                section,
                label: section.label(),
                href: section.href(),
                current: section == self.active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_metrics_two_recent_rows() {
        assert_eq!(STATS.len(), 4);
        assert_eq!(RECENT_APPLICATIONS.len(), 2);
        assert_eq!(STATS[3].trend, Trend::Negative);
        assert_eq!(RECENT_APPLICATIONS[1].status.label(), "Approved");
    }

    #[test]
    fn dashboard_is_highlighted_first() {
        let items = NavState::default().items();
        let current: Vec<_> = items.iter().filter(|i| i.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].section, NavSection::Dashboard);
    }

    #[test]
    fn selecting_moves_the_single_highlight() {
        let nav = NavState::default().select(NavSection::Users);
        let current: Vec<NavSection> = nav
            .items()
            .into_iter()
            .filter(|i| i.current)
            .map(|i| i.section)
            .collect();
        assert_eq!(current, vec![NavSection::Users]);
        assert_eq!(nav.active(), NavSection::Users);
    }
}
