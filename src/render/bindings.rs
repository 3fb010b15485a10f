//! Binding table between content keys and page nodes
//!
//! Resolved once per page, before the first render. The renderer only
//! ever walks this table; it never searches the document again.

use crate::markup::{Document, NodeId};
use std::collections::{BTreeMap, HashSet};

/// Attribute marking an element whose text is a translation
pub const TEXT_KEY_ATTR: &str = "data-lang";

/// Attribute marking a navigation menu item
pub const NAV_KEY_ATTR: &str = "data-nav";

/// Region regenerated from a list or record entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    ProfileInfo,
    Intention,
    SelfEvaluation,
    Education,
    Experience,
    CampusExperience,
    Skills,
    SideNav,
}

/// How a section finds its container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// First element with `class` inside the element with `id`
    Scoped {
        id: &'static str,
        class: &'static str,
    },
    /// First element with `class` anywhere
    Class(&'static str),
    /// Every `<li>` inside the first element with `class`
    Items(&'static str),
}

impl SectionKind {
    pub const ALL: [SectionKind; 8] = [
        SectionKind::ProfileInfo,
        SectionKind::Intention,
        SectionKind::SelfEvaluation,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::CampusExperience,
        SectionKind::Skills,
        SectionKind::SideNav,
    ];

    /// Translation key feeding the section
    pub fn content_key(self) -> &'static str {
        match self {
            SectionKind::ProfileInfo => "profileInfo",
            SectionKind::Intention => "intentionList",
            SectionKind::SelfEvaluation => "selfEvalText",
            SectionKind::Education => "educationList",
            SectionKind::Experience => "experienceList",
            SectionKind::CampusExperience => "schoolExpList",
            SectionKind::Skills => "skillsList",
            SectionKind::SideNav => "navMenu",
        }
    }

    pub fn locator(self) -> Locator {
        match self {
            SectionKind::ProfileInfo => Locator::Scoped {
                id: "profile",
                class: "info-list",
            },
            SectionKind::Intention => Locator::Scoped {
                id: "intention",
                class: "info-list",
            },
            SectionKind::SelfEvaluation => Locator::Class("self-eval"),
            SectionKind::Education => Locator::Scoped {
                id: "education",
                class: "timeline",
            },
            SectionKind::Experience => Locator::Scoped {
                id: "experience",
                class: "timeline",
            },
            SectionKind::CampusExperience => Locator::Scoped {
                id: "schoolExp",
                class: "timeline",
            },
            SectionKind::Skills => Locator::Scoped {
                id: "skills",
                class: "skills-list",
            },
            SectionKind::SideNav => Locator::Items("side-nav-list"),
        }
    }

    /// Class of the subtitle paragraph in timeline items
    pub fn subtitle_class(self) -> &'static str {
        match self {
            SectionKind::Education => "major",
            _ => "position",
        }
    }
}

/// Resolved render target of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionTarget {
    Container(NodeId),
    Items(Vec<NodeId>),
}

impl SectionTarget {
    fn nodes(&self) -> &[NodeId] {
        match self {
            SectionTarget::Container(id) => std::slice::from_ref(id),
            SectionTarget::Items(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBinding {
    pub kind: SectionKind,
    pub target: SectionTarget,
}

/// Every render target of one page
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    /// `data-lang` elements grouped by key
    pub text: BTreeMap<String, Vec<NodeId>>,

    /// Structured sections present on the page
    pub sections: Vec<SectionBinding>,

    /// `data-nav` menu items with their keys
    pub nav_items: Vec<(String, NodeId)>,
}

impl Bindings {
    /// Resolve all bindings of `doc`
    ///
    /// The side navigation is bound only when `side_nav` is set. Any
    /// binding nested inside a node that gets rewritten (a `data-lang`
    /// element or another section) is dropped, since a rewrite releases
    /// its nodes.
    pub fn resolve(doc: &Document, side_nav: bool) -> Self {
        let candidates: Vec<SectionBinding> = SectionKind::ALL
            .iter()
            .filter(|kind| side_nav || **kind != SectionKind::SideNav)
            .filter_map(|kind| {
                let target = locate(doc, kind.locator());
                if target.is_none() {
                    log::trace!("Section {:?} not present on this page", kind);
                }
                target.map(|target| SectionBinding {
                    kind: *kind,
                    target,
                })
            })
            .collect();

        let tagged = doc.with_attr(TEXT_KEY_ATTR);

        let mut rewritten: HashSet<NodeId> = candidates
            .iter()
            .flat_map(|s| s.target.nodes().iter().copied())
            .collect();
        rewritten.extend(tagged.iter().map(|(id, _)| *id));

        let sections: Vec<SectionBinding> = candidates
            .into_iter()
            .filter(|section| {
                let nested = section
                    .target
                    .nodes()
                    .iter()
                    .any(|node| inside_any(doc, *node, &rewritten));
                if nested {
                    log::debug!("Skipping section {:?} nested inside rewritten content", section.kind);
                }
                !nested
            })
            .collect();

        let mut text: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
        for (id, key) in tagged {
            if inside_any(doc, id, &rewritten) {
                log::debug!("Skipping nested '{}' binding inside rewritten content", key);
                continue;
            }
            text.entry(key).or_default().push(id);
        }

        let nav_items = doc
            .with_attr(NAV_KEY_ATTR)
            .into_iter()
            .filter(|(id, _)| !inside_any(doc, *id, &rewritten))
            .map(|(id, key)| (key, id))
            .collect();

        Self {
            text,
            sections,
            nav_items,
        }
    }

    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&SectionBinding> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Total number of text-bound elements
    pub fn text_targets(&self) -> usize {
        self.text.values().map(Vec::len).sum()
    }
}

fn locate(doc: &Document, locator: Locator) -> Option<SectionTarget> {
    match locator {
        Locator::Scoped { id, class } => {
            let scope = doc.element_by_id(id)?;
            doc.by_class(scope, class)
                .first()
                .copied()
                .map(SectionTarget::Container)
        }
        Locator::Class(class) => doc
            .by_class(doc.root(), class)
            .first()
            .copied()
            .map(SectionTarget::Container),
        Locator::Items(class) => {
            let list = doc.by_class(doc.root(), class).first().copied()?;
            let items = doc.by_tag(list, "li");
            (!items.is_empty()).then_some(SectionTarget::Items(items))
        }
    }
}

/// Whether a strict ancestor of `id` is in `set`
fn inside_any(doc: &Document, id: NodeId, set: &HashSet<NodeId>) -> bool {
    let mut current = doc.parent(id);
    while let Some(node) = current {
        if set.contains(&node) {
            return true;
        }
        current = doc.parent(node);
    }
    false
}
