//! Template engine for rendering documentation pages.

use minijinja::Environment;
use serde::Serialize;

use quire_docs::TocEntry;
use quire_nav::{NavItem, Pagination};

use crate::site::{FooterView, NavbarView, SiteMetadata};

/// Chrome shared by every page of a build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    pub site: SiteMetadata,
    pub base_url: String,
    pub navbar: NavbarView,
    pub footer: FooterView,
    /// Stylesheet URLs
    pub styles: Vec<String>,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, Serialize)]
pub struct Context<'a> {
    pub layout: &'a Layout,
    /// Page title
    pub title: String,
    /// Meta description
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    /// Sidebar next to the page
    pub sidebar: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    /// Previous/next links
    pub pagination: Pagination,
    /// "Edit this page" target
    pub edit_url: Option<String>,
}

impl<'a> Context<'a> {
    /// Context with only layout and title set.
    pub fn new(layout: &'a Layout, title: impl Into<String>) -> Self {
        Self {
            layout,
            title: title.into(),
            description: None,
            content: String::new(),
            sidebar: Vec::new(),
            toc: Vec::new(),
            pagination: Pagination::default(),
            edit_url: None,
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("sidebar.html", SIDEBAR_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("404.html", NOT_FOUND_TEMPLATE),
        ] {
            env.add_template(name, source)
                .expect("built-in templates are valid");
        }

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context<'_>,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template(template)?.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ layout.site.locale }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title != layout.site.title %}{{ title }} | {% endif %}{{ layout.site.title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% if layout.site.image %}<meta property="og:image" content="{{ layout.site.url }}{{ layout.base_url }}{{ layout.site.image }}">
  {% endif %}{% if layout.site.favicon %}<link rel="icon" href="{{ layout.base_url }}{{ layout.site.favicon }}">
  {% endif %}<link rel="stylesheet" href="{{ layout.base_url }}assets/main.css">
  {% for style in layout.styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  <nav class="navbar">
    <a class="navbar__brand" href="{{ layout.navbar.home }}">
      {% if layout.navbar.logo %}<img class="navbar__logo" src="{{ layout.navbar.logo.src }}" alt="{{ layout.navbar.logo.alt }}">{% endif %}
      <b class="navbar__title">{{ layout.navbar.title }}</b>
    </a>
    <div class="navbar__items">
      {% for link in layout.navbar.left %}<a class="navbar__link" href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a>
      {% endfor %}
    </div>
    <div class="navbar__items navbar__items--right">
      {% for link in layout.navbar.right %}<a class="navbar__link" href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a>
      {% endfor %}
    </div>
  </nav>
  {% block body %}{% endblock %}
  <footer class="footer footer--{{ layout.footer.style }}">
    <div class="footer__links">
    {% for group in layout.footer.groups %}
      <div class="footer__col">
        <div class="footer__title">{{ group.title }}</div>
        <ul class="footer__items">
        {% for link in group.links %}
          <li><a class="footer__link" href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a></li>
        {% endfor %}
        </ul>
      </div>
    {% endfor %}
    </div>
    {% if layout.footer.copyright %}<div class="footer__copyright">{{ layout.footer.copyright | safe }}</div>{% endif %}
  </footer>
</body>
</html>"##;

const SIDEBAR_TEMPLATE: &str = r##"<ul class="menu__list">
{% for item in sidebar recursive %}
  {% if item.kind == "category" %}
  <li class="menu__list-item{% if item.active %} menu__list-item--active{% endif %}">
    <details class="menu__category"{% if not item.collapsed %} open{% endif %}>
      <summary class="menu__link menu__link--sublist">{{ item.label }}</summary>
      {% if item.children %}<ul class="menu__list">{{ loop(item.children) }}</ul>{% endif %}
    </details>
  </li>
  {% elif item.broken %}
  <li class="menu__list-item"><span class="menu__link menu__link--broken" title="Missing document">{{ item.label }}</span></li>
  {% else %}
  <li class="menu__list-item"><a class="menu__link{% if item.active %} menu__link--active{% endif %}" href="{{ item.href }}">{{ item.label }}</a></li>
  {% endif %}
{% endfor %}
</ul>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<div class="doc-layout">
  {% if sidebar %}
  <aside class="sidebar">
    {% include "sidebar.html" %}
  </aside>
  {% endif %}
  <main class="doc-main">
    <article class="doc">
      <div class="content">
        {{ content | safe }}
      </div>
      {% if edit_url %}<a class="edit-link" href="{{ edit_url }}" target="_blank" rel="noopener noreferrer">Edit this page</a>{% endif %}
      {% if pagination.previous or pagination.next %}
      <nav class="pagination-nav">
        {% if pagination.previous %}<a class="pagination-nav__link pagination-nav__link--prev" href="{{ pagination.previous.permalink }}"><span class="pagination-nav__sublabel">Previous</span><span class="pagination-nav__label">{{ pagination.previous.title }}</span></a>{% endif %}
        {% if pagination.next %}<a class="pagination-nav__link pagination-nav__link--next" href="{{ pagination.next.permalink }}"><span class="pagination-nav__sublabel">Next</span><span class="pagination-nav__label">{{ pagination.next.title }}</span></a>{% endif %}
      </nav>
      {% endif %}
    </article>
    {% if toc %}
    <aside class="toc">
      <h2>On this page</h2>
      <ul>
      {% for entry in toc %}
        <li class="toc-level-{{ entry.level }}"><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
      {% endfor %}
      </ul>
    </aside>
    {% endif %}
  </main>
</div>
{% endblock %}"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<header class="hero">
  <div class="container">
    <h1 class="hero__title">{{ layout.site.title }}</h1>
    {% if layout.site.tagline %}<p class="hero__subtitle">{{ layout.site.tagline }}</p>{% endif %}
    {% if layout.navbar.left %}<a class="button button--primary" href="{{ layout.navbar.left[0].href }}">{{ layout.navbar.left[0].label }}</a>{% endif %}
  </div>
</header>
<main>
  {{ content | safe }}
</main>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<main class="container not-found">
  <h1>Page Not Found</h1>
  <p>We could not find what you were looking for.</p>
  <p><a href="{{ layout.base_url }}">Back to the homepage</a></p>
</main>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Link;
    use quire_nav::{NavKind, PageLink};

    // minijinja escapes `/` inside attribute values
    fn render(engine: &TemplateEngine, template: &str, context: &Context<'_>) -> String {
        engine
            .render_page(template, context)
            .unwrap()
            .replace("&#x2f;", "/")
    }

    fn layout() -> Layout {
        Layout {
            site: SiteMetadata {
                title: "My Docs".to_string(),
                ..Default::default()
            },
            base_url: "/".to_string(),
            ..Default::default()
        }
    }

    fn doc_item(label: &str, href: Option<&str>, active: bool) -> NavItem {
        NavItem {
            kind: NavKind::Doc,
            label: label.to_string(),
            href: href.map(str::to_string),
            active,
            broken: href.is_none(),
            collapsed: false,
            children: vec![],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();
        let layout = layout();

        let mut context = Context::new(&layout, "Intro");
        context.content = "<p>Hello world</p>".to_string();

        let html = render(&engine, "doc.html", &context);

        assert!(html.contains("<title>Intro | My Docs</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(!html.contains("pagination-nav"));
    }

    #[test]
    fn renders_nested_sidebar() {
        let engine = TemplateEngine::new();
        let layout = layout();

        let mut context = Context::new(&layout, "Setup");
        context.sidebar = vec![
            doc_item("Intro", Some("/docs/intro"), false),
            NavItem {
                kind: NavKind::Category,
                label: "Getting Started".to_string(),
                href: None,
                active: true,
                broken: false,
                collapsed: false,
                children: vec![
                    doc_item("Setup", Some("/docs/setup"), true),
                    doc_item("gone", None, false),
                ],
            },
        ];

        let html = render(&engine, "doc.html", &context);

        assert!(html.contains(r#"<summary class="menu__link menu__link--sublist">Getting Started</summary>"#));
        assert!(html.contains(r#"<a class="menu__link menu__link--active" href="/docs/setup">Setup</a>"#));
        assert!(html.contains("menu__link--broken"));
        assert!(html.contains("<details class=\"menu__category\" open>"));
    }

    #[test]
    fn renders_pagination_and_edit_link() {
        let engine = TemplateEngine::new();
        let layout = layout();

        let mut context = Context::new(&layout, "Setup");
        context.pagination = Pagination {
            previous: Some(PageLink {
                title: "Intro".to_string(),
                permalink: "/docs/intro".to_string(),
            }),
            next: None,
        };
        context.edit_url = Some("https://github.com/o/r/tree/main/docs/setup.md".to_string());

        let html = render(&engine, "doc.html", &context);

        assert!(html.contains(r#"href="/docs/intro""#));
        assert!(html.contains("Previous"));
        assert!(!html.contains("pagination-nav__link--next"));
        assert!(html.contains("Edit this page"));
    }

    #[test]
    fn renders_chrome_on_home() {
        let engine = TemplateEngine::new();
        let mut layout = layout();
        layout.site.tagline = "AI for BIM".to_string();
        layout.navbar.title = "Docs".to_string();
        layout.navbar.left = vec![Link {
            label: "Documentation".to_string(),
            href: "/docs/intro".to_string(),
            external: false,
        }];
        layout.footer.copyright = Some("Powered by <a href=\"https://dcmvn.com\">DCMvn</a>".to_string());

        let mut context = Context::new(&layout, "My Docs");
        context.content = "<section class=\"features\"></section>".to_string();

        let html = render(&engine, "home.html", &context);

        assert!(html.contains("<title>My Docs</title>"));
        assert!(html.contains("AI for BIM"));
        assert!(html.contains(r#"<a class="button button--primary" href="/docs/intro">Documentation</a>"#));
        assert!(html.contains("<section class=\"features\"></section>"));
        assert!(html.contains("<a href=\"https://dcmvn.com\">DCMvn</a>"));
    }

    #[test]
    fn escapes_untrusted_text() {
        let engine = TemplateEngine::new();
        let layout = layout();

        let context = Context::new(&layout, "<script>");

        let html = render(&engine, "404.html", &context);

        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Page Not Found"));
    }
}
