//! Site metadata and global chrome (navbar, footer).
//!
//! These values are passed through to the page templates. The only logic
//! here is turning configured link targets into concrete URLs.

use serde::{Deserialize, Serialize};

use quire_docs::{DocumentSet, RouteOptions};
use quire_nav::{DocumentIndex, Sidebars};

/// Global site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    /// Site title
    pub title: String,

    /// One-line tagline shown on the homepage hero
    pub tagline: String,

    /// Favicon path, relative to the base URL
    pub favicon: Option<String>,

    /// Production origin, e.g. "https://diggtvu.github.io"
    pub url: String,

    /// Social card image
    pub image: Option<String>,

    /// GitHub organization or user that owns the site
    pub organization: Option<String>,

    /// Repository name
    pub project: Option<String>,

    /// Branch the built site is deployed to
    pub deployment_branch: Option<String>,

    /// HTML `lang` attribute
    pub locale: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            tagline: String::new(),
            favicon: None,
            url: String::new(),
            image: None,
            organization: None,
            project: None,
            deployment_branch: None,
            locale: "en".to_string(),
        }
    }
}

/// Navbar logo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    pub alt: String,
    pub src: String,
}

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Left,
    Right,
}

/// A configured navbar item.
///
/// Exactly one of `sidebar`, `to` or `href` is expected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarItem {
    pub label: String,
    /// Links to the first document of the named sidebar
    pub sidebar: Option<String>,
    /// Site-relative path
    pub to: Option<String>,
    /// External URL
    pub href: Option<String>,
    pub position: Position,
}

/// Navbar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Navbar {
    /// Title next to the logo (defaults to the site title)
    pub title: Option<String>,
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

/// A configured footer link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub label: String,
    pub to: Option<String>,
    pub href: Option<String>,
}

/// A titled column of footer links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterGroup {
    pub title: String,
    pub items: Vec<FooterLink>,
}

/// Footer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    /// "dark" or "light"
    pub style: String,
    pub links: Vec<FooterGroup>,
    /// Trusted markup
    pub copyright: Option<String>,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            style: "dark".to_string(),
            links: Vec::new(),
            copyright: None,
        }
    }
}

/// A link ready for templating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
    pub external: bool,
}

/// Resolved navbar.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavbarView {
    pub title: String,
    pub logo: Option<Logo>,
    pub home: String,
    pub left: Vec<Link>,
    pub right: Vec<Link>,
}

/// Resolved footer column.
#[derive(Debug, Clone, Serialize)]
pub struct FooterGroupView {
    pub title: String,
    pub links: Vec<Link>,
}

/// Resolved footer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FooterView {
    pub style: String,
    pub groups: Vec<FooterGroupView>,
    pub copyright: Option<String>,
}

/// Resolve a `to`/`href` pair; `href` wins when both are set.
fn resolve_target(
    label: &str,
    to: Option<&str>,
    href: Option<&str>,
    routes: &RouteOptions,
) -> Option<Link> {
    if let Some(href) = href {
        return Some(Link {
            label: label.to_string(),
            href: href.to_string(),
            external: true,
        });
    }

    to.map(|to| Link {
        label: label.to_string(),
        href: routes.url(to),
        external: false,
    })
}

impl Navbar {
    /// Resolve navbar items to concrete links, skipping unresolvable ones.
    pub fn resolve(
        &self,
        site: &SiteMetadata,
        routes: &RouteOptions,
        sidebars: &Sidebars,
        docs: &DocumentSet,
    ) -> NavbarView {
        let mut view = NavbarView {
            title: self.title.clone().unwrap_or_else(|| site.title.clone()),
            logo: self.logo.clone(),
            home: routes.base(),
            ..Default::default()
        };

        for item in &self.items {
            let link = match &item.sidebar {
                Some(name) => sidebars
                    .get(name)
                    .and_then(|sidebar| sidebar.first_doc())
                    .and_then(|doc| docs.resolve(&doc.id))
                    .map(|resolved| Link {
                        label: item.label.clone(),
                        href: resolved.permalink,
                        external: false,
                    }),
                None => resolve_target(
                    &item.label,
                    item.to.as_deref(),
                    item.href.as_deref(),
                    routes,
                ),
            };

            let Some(link) = link else {
                tracing::warn!("Navbar item '{}' has no resolvable target", item.label);
                continue;
            };

            match item.position {
                Position::Left => view.left.push(link),
                Position::Right => view.right.push(link),
            }
        }

        view
    }
}

impl Footer {
    /// Resolve footer links, skipping unresolvable ones.
    pub fn resolve(&self, routes: &RouteOptions) -> FooterView {
        let groups = self
            .links
            .iter()
            .map(|group| FooterGroupView {
                title: group.title.clone(),
                links: group
                    .items
                    .iter()
                    .filter_map(|item| {
                        let link = resolve_target(
                            &item.label,
                            item.to.as_deref(),
                            item.href.as_deref(),
                            routes,
                        );
                        if link.is_none() {
                            tracing::warn!("Footer link '{}' has no target", item.label);
                        }
                        link
                    })
                    .collect(),
            })
            .collect();

        FooterView {
            style: self.style.clone(),
            groups,
            copyright: self.copyright.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_nav::{Sidebar, SidebarEntry};
    use std::path::PathBuf;

    fn docs(routes: &RouteOptions) -> DocumentSet {
        let mut set = DocumentSet::new();
        set.insert(
            quire_docs::Document::from_source(
                "# Intro",
                PathBuf::from("docs/intro.md"),
                PathBuf::from("intro.md"),
                routes,
            )
            .unwrap(),
        )
        .unwrap();
        set
    }

    #[test]
    fn resolves_navbar_items_by_kind() {
        let routes = RouteOptions {
            base_url: "/pyDCMvnDocs/".to_string(),
            ..Default::default()
        };
        let mut sidebars = Sidebars::new();
        sidebars.insert(Sidebar::new(
            "tutorialSidebar",
            vec![SidebarEntry::doc("intro")],
        ));

        let navbar = Navbar {
            title: None,
            logo: None,
            items: vec![
                NavbarItem {
                    label: "Documentation".to_string(),
                    sidebar: Some("tutorialSidebar".to_string()),
                    ..Default::default()
                },
                NavbarItem {
                    label: "GitHub".to_string(),
                    href: Some("https://github.com/diggtvu/pyDCMvnDocs".to_string()),
                    position: Position::Right,
                    ..Default::default()
                },
                NavbarItem {
                    label: "Nowhere".to_string(),
                    sidebar: Some("missing".to_string()),
                    ..Default::default()
                },
            ],
        };

        let site = SiteMetadata {
            title: "Cursor AI for BIM".to_string(),
            ..Default::default()
        };
        let view = navbar.resolve(&site, &routes, &sidebars, &docs(&routes));

        assert_eq!(view.title, "Cursor AI for BIM");
        assert_eq!(view.home, "/pyDCMvnDocs/");
        assert_eq!(
            view.left,
            vec![Link {
                label: "Documentation".to_string(),
                href: "/pyDCMvnDocs/docs/intro".to_string(),
                external: false,
            }]
        );
        assert_eq!(view.right.len(), 1);
        assert!(view.right[0].external);
    }

    #[test]
    fn resolves_footer_links() {
        let routes = RouteOptions {
            base_url: "/site/".to_string(),
            ..Default::default()
        };
        let footer = Footer {
            links: vec![FooterGroup {
                title: "Community".to_string(),
                items: vec![
                    FooterLink {
                        label: "Contributing".to_string(),
                        to: Some("/docs/contributing".to_string()),
                        href: None,
                    },
                    FooterLink {
                        label: "Empty".to_string(),
                        to: None,
                        href: None,
                    },
                ],
            }],
            ..Default::default()
        };

        let view = footer.resolve(&routes);

        assert_eq!(view.style, "dark");
        assert_eq!(view.groups[0].links.len(), 1);
        assert_eq!(view.groups[0].links[0].href, "/site/docs/contributing");
    }
}
