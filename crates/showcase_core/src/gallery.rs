//! Static project catalogue shown on the landing page.
//!
//! Internal links point at shell routes; external links open hosted demos.

use crate::shell::router::Route;

/// Where a project card's link leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectLink {
    Internal(&'static str),
    External(&'static str),
}

impl ProjectLink {
    pub fn href(self) -> &'static str {
        match self {
            Self::Internal(path) | Self::External(path) => path,
        }
    }

    /// Route an internal link opens; `None` for external or dangling links.
    pub fn route(self) -> Option<Route> {
        match self {
            Self::Internal(path) => Route::resolve(path),
            Self::External(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub link: ProjectLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub title: &'static str,
    pub projects: &'static [Project],
}

const REACT_PROJECTS: &[Project] = &[
    Project {
        name: "Calculator",
        link: ProjectLink::Internal("/Calculator"),
    },
    Project {
        name: "ToDO List",
        link: ProjectLink::Internal("/ToDo-List"),
    },
];

const WEB_PROJECTS: &[Project] = &[
    Project {
        name: "Microsoft Web Clone",
        link: ProjectLink::External("https://micro-soft-web-clone.netlify.app/"),
    },
    Project {
        name: "Calculator",
        link: ProjectLink::External("https://my-cal-2.netlify.app/"),
    },
    Project {
        name: "Tic-Tac-Toe",
        link: ProjectLink::External("https://tic-tac-toe-webs.netlify.app/"),
    },
    Project {
        name: "Quiz",
        link: ProjectLink::External("https://quiz-game-d.netlify.app/"),
    },
];

const CATEGORIES: &[Category] = &[
    Category {
        title: "React.js & Tailwind CSS Projects",
        projects: REACT_PROJECTS,
    },
    Category {
        title: "HTML, CSS & JavaScript Projects",
        projects: WEB_PROJECTS,
    },
];

/// Catalogue in display order.
pub fn categories() -> &'static [Category] {
    CATEGORIES
}
