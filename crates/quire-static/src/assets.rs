//! Stylesheet generation and minification.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The built-in theme stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* Quire default theme */

:root {
  --primary: #2e8555;
  --primary-dark: #29784c;
  --background: #ffffff;
  --foreground: #1c1e21;
  --muted: #606770;
  --border: #dadde1;
  --surface: #f5f6f7;
  --danger: #fa383e;
  --navbar-height: 60px;
  --sidebar-width: 280px;
  --toc-width: 220px;
  --content-max-width: 800px;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.65;
}

a {
  color: var(--primary);
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

.container {
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

/* Navbar */
.navbar {
  position: sticky;
  top: 0;
  z-index: 10;
  display: flex;
  align-items: center;
  gap: 1.5rem;
  height: var(--navbar-height);
  padding: 0 1rem;
  background: var(--background);
  border-bottom: 1px solid var(--border);
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  color: var(--foreground);
}

.navbar__logo {
  height: 32px;
}

.navbar__items {
  display: flex;
  gap: 1rem;
}

.navbar__items--right {
  margin-left: auto;
}

.navbar__link {
  color: var(--foreground);
  font-weight: 500;
}

/* Doc layout */
.doc-layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: calc(100vh - var(--navbar-height));
}

.sidebar {
  position: sticky;
  top: var(--navbar-height);
  height: calc(100vh - var(--navbar-height));
  overflow-y: auto;
  padding: 1rem 0.5rem;
  border-right: 1px solid var(--border);
}

.doc-main {
  display: grid;
  grid-template-columns: minmax(0, 1fr) var(--toc-width);
  gap: 2rem;
  padding: 2rem;
}

.doc {
  max-width: var(--content-max-width);
}

/* Sidebar menu */
.menu__list {
  list-style: none;
  margin: 0;
  padding-left: 0;
}

.menu__list .menu__list {
  padding-left: 0.75rem;
}

.menu__link {
  display: block;
  padding: 0.35rem 0.75rem;
  border-radius: 0.25rem;
  color: var(--muted);
  cursor: pointer;
}

.menu__link:hover {
  background: var(--surface);
  text-decoration: none;
}

.menu__link--active {
  color: var(--primary);
  background: var(--surface);
  font-weight: 600;
}

.menu__link--sublist {
  font-weight: 600;
  color: var(--foreground);
}

.menu__link--broken {
  color: var(--danger);
  text-decoration: line-through;
  cursor: not-allowed;
}

/* Content */
.content h1 {
  font-size: 2.5rem;
  margin-top: 0;
}

.content pre {
  padding: 1rem;
  overflow-x: auto;
  background: var(--surface);
  border-radius: 0.5rem;
}

.content code {
  font-family: ui-monospace, "SFMono-Regular", Menlo, monospace;
  font-size: 0.9em;
}

.content table {
  border-collapse: collapse;
}

.content th,
.content td {
  padding: 0.5rem 0.75rem;
  border: 1px solid var(--border);
}

.edit-link {
  display: inline-block;
  margin-top: 2rem;
}

/* Pagination */
.pagination-nav {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 1rem;
  margin-top: 2rem;
}

.pagination-nav__link {
  display: flex;
  flex-direction: column;
  padding: 1rem;
  border: 1px solid var(--border);
  border-radius: 0.5rem;
}

.pagination-nav__link--next {
  grid-column: 2;
  text-align: right;
}

.pagination-nav__sublabel {
  font-size: 0.85rem;
  color: var(--muted);
}

.pagination-nav__label {
  font-weight: 600;
}

/* Table of contents */
.toc {
  position: sticky;
  top: calc(var(--navbar-height) + 2rem);
  align-self: start;
  font-size: 0.875rem;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
  color: var(--muted);
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc-level-3 {
  padding-left: 0.75rem;
}

/* Homepage */
.hero {
  padding: 4rem 0;
  text-align: center;
  background: var(--primary);
  color: #ffffff;
}

.hero__title {
  font-size: 3rem;
  margin: 0;
}

.hero__subtitle {
  font-size: 1.5rem;
}

.button {
  display: inline-block;
  padding: 0.75rem 1.5rem;
  border-radius: 0.5rem;
  font-weight: 700;
}

.button--primary {
  background: #ffffff;
  color: var(--primary-dark);
}

.features {
  display: flex;
  align-items: center;
  padding: 2rem 0;
  width: 100%;
}

.row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 -1rem;
}

.col {
  flex: 1 0 0;
  padding: 0 1rem;
}

.col--4 {
  flex: 0 0 33.333%;
  max-width: 33.333%;
}

.text--center {
  text-align: center;
}

.padding-horiz--md {
  padding-left: 1rem;
  padding-right: 1rem;
}

.showcase-stats,
.showcase-prompts {
  margin-top: 3rem;
  text-align: center;
}

.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
  gap: 1.5rem;
  margin-top: 1.5rem;
}

.stat-card {
  display: flex;
  flex-direction: column;
  padding: 1.5rem;
  border-radius: 0.75rem;
  background: var(--surface);
}

.stat-number {
  font-size: 2rem;
  font-weight: 800;
  color: var(--primary);
}

.stat-label {
  color: var(--muted);
}

.prompt-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
  gap: 1.5rem;
  margin-top: 1.5rem;
  text-align: left;
}

.prompt-card {
  padding: 1.25rem;
  border: 1px solid var(--border);
  border-left: 4px solid var(--primary);
  border-radius: 0.5rem;
}

.prompt-card h4 {
  margin-top: 0;
}

/* Footer */
.footer {
  padding: 2rem 1rem;
}

.footer--dark {
  background: #303846;
  color: #ebedf0;
}

.footer--dark .footer__link {
  color: #ebedf0;
}

.footer__links {
  display: flex;
  flex-wrap: wrap;
  justify-content: space-around;
  gap: 2rem;
}

.footer__title {
  font-weight: 700;
  margin-bottom: 0.5rem;
}

.footer__items {
  list-style: none;
  padding: 0;
  margin: 0;
}

.footer__copyright {
  margin-top: 2rem;
  text-align: center;
}

.not-found {
  padding: 4rem 1rem;
}

@media (max-width: 996px) {
  .doc-layout,
  .doc-main {
    grid-template-columns: 1fr;
  }

  .sidebar,
  .toc {
    display: none;
  }

  .col--4 {
    flex-basis: 100%;
    max-width: 100%;
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(":root"));
        assert!(css.contains(".menu__link--broken"));
        assert!(css.contains(".stats-grid"));
        assert!(css.contains(".prompt-grid"));
    }

    #[test]
    fn minifies_theme() {
        let css = AssetPipeline::generate_css();

        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.len() < css.len());
        assert!(minified.contains(".col--4"));
    }
}
