//! Hypermedia links attached to single-resource responses.
//!
//! Links come from a fixed table per resource kind; `{id}` in an href is
//! replaced with the resource id.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Auditorium,
    Course,
    Group,
    Professor,
    Student,
    Template,
    Schedule,
    Option,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

pub type Links = BTreeMap<&'static str, Link>;

const AUDITORIUM_LINKS: &[(&str, &str)] = &[
    ("self", "/api/auditoriums/{id}"),
    ("collection", "/api/auditoriums"),
    ("available", "/api/auditoriums/available"),
];

const COURSE_LINKS: &[(&str, &str)] = &[
    ("self", "/api/courses/{id}"),
    ("collection", "/api/courses"),
];

const GROUP_LINKS: &[(&str, &str)] = &[
    ("self", "/api/groups/{id}"),
    ("collection", "/api/groups"),
];

const PROFESSOR_LINKS: &[(&str, &str)] = &[
    ("self", "/api/professors/{id}"),
    ("collection", "/api/professors"),
    ("courses", "/api/professors/{id}/courses"),
    ("available", "/api/professors/available"),
];

const STUDENT_LINKS: &[(&str, &str)] = &[
    ("self", "/api/students/{id}"),
    ("collection", "/api/students"),
    ("transfer", "/api/students/{id}/group"),
];

const TEMPLATE_LINKS: &[(&str, &str)] = &[
    ("self", "/api/templates/{id}"),
    ("collection", "/api/templates"),
    ("generate", "/api/templates/generate"),
];

const SCHEDULE_LINKS: &[(&str, &str)] = &[
    ("self", "/api/schedules/{id}"),
    ("collection", "/api/schedules"),
    ("options", "/api/schedules/{id}/options"),
    ("reschedule", "/api/schedules/{id}/reschedule"),
    ("substitute", "/api/schedules/{id}/professor"),
    ("professors", "/api/professors/available"),
];

const OPTION_LINKS: &[(&str, &str)] = &[
    ("self", "/api/options/{id}"),
    ("collection", "/api/options"),
];

impl ResourceKind {
    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ResourceKind::Auditorium => AUDITORIUM_LINKS,
            ResourceKind::Course => COURSE_LINKS,
            ResourceKind::Group => GROUP_LINKS,
            ResourceKind::Professor => PROFESSOR_LINKS,
            ResourceKind::Student => STUDENT_LINKS,
            ResourceKind::Template => TEMPLATE_LINKS,
            ResourceKind::Schedule => SCHEDULE_LINKS,
            ResourceKind::Option => OPTION_LINKS,
        }
    }
}

pub fn links_for(kind: ResourceKind, id: i64) -> Links {
    let id = id.to_string();
    kind.table()
        .iter()
        .map(|(rel, href)| {
            (
                *rel,
                Link {
                    href: href.replace("{id}", &id),
                },
            )
        })
        .collect()
}

/// Links to the lists a caller can pick its identity from.
pub fn selection_links(subject: &str) -> Links {
    let mut links = Links::new();
    if subject.contains("professor") {
        links.insert(
            "professors",
            Link {
                href: "/api/professors".to_string(),
            },
        );
    }
    if subject.contains("student") {
        links.insert(
            "students",
            Link {
                href: "/api/students".to_string(),
            },
        );
    }
    links
}

/// A resource with its `_links` flattened alongside its fields.
#[derive(Debug, Clone, Serialize)]
pub struct Linked<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> Linked<T> {
    pub fn new(kind: ResourceKind, id: i64, data: T) -> Self {
        Self {
            data,
            links: links_for(kind, id),
        }
    }
}
