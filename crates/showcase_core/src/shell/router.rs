//! Path to feature-module routing.
//!
//! # Invariants
//! - Every path resolves to at most one module.
//! - Matching ignores ASCII case, trailing slashes, query and fragment.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

static PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/*(?P<segment>[^/?#]*)/*(?:[?#].*)?$").expect("valid route regex")
});

/// Feature module selected by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Gallery,
    Calculator,
    TodoList,
}

impl Route {
    pub const ALL_ROUTES: [Route; 3] = [Self::Gallery, Self::Calculator, Self::TodoList];

    /// Canonical path of this route.
    pub fn path(self) -> &'static str {
        match self {
            Self::Gallery => "/",
            Self::Calculator => "/calculator",
            Self::TodoList => "/todo-list",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Gallery => "Projects",
            Self::Calculator => "Calculator",
            Self::TodoList => "Interactive To-Do",
        }
    }

    /// Resolves `path` to a route; `None` when nothing matches.
    pub fn resolve(path: &str) -> Option<Self> {
        let captures = PATH_RE.captures(path.trim())?;
        let segment = captures
            .name("segment")
            .map_or("", |segment| segment.as_str())
            .to_ascii_lowercase();

        match segment.as_str() {
            "" => Some(Self::Gallery),
            "calculator" => Some(Self::Calculator),
            "todo-list" => Some(Self::TodoList),
            _ => None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
