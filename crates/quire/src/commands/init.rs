//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files written by `quire init`, relative to the project root.
const STARTER_FILES: &[(&str, &str)] = &[
    ("quire.toml", DEFAULT_CONFIG),
    ("sidebars.json", DEFAULT_SIDEBARS),
    ("docs/intro.md", DEFAULT_INTRO),
    ("docs/getting-started/installation.md", DEFAULT_INSTALLATION),
    ("docs/getting-started/writing-docs.md", DEFAULT_WRITING_DOCS),
];

/// Run the init command.
pub async fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing quire...");

    let docs_dir = root.join("docs");

    // Check if docs already exists
    if docs_dir.exists() && !yes {
        tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    for (relative, contents) in STARTER_FILES {
        let path = root.join(relative);
        if path.exists() && !yes {
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'quire build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Quire configuration

[site]
title = "My Documentation"
tagline = "Documentation built with quire"
# Production origin, used for the sitemap
url = "https://example.github.io"
# Path the site is served under
base_url = "/"
trailing_slash = false
# ignore, warn or fail
on_broken_links = "warn"

[docs]
dir = "docs"
output = "build"
sidebar_path = "sidebars.json"
route_base_path = "docs"
# edit_url = "https://github.com/you/your-docs/tree/main/"

[navbar]
title = "My Documentation"

[[navbar.items]]
label = "Documentation"
sidebar = "tutorialSidebar"

[footer]
style = "dark"
copyright = "Built with quire."

[[footer.links]]
title = "Docs"
items = [{ label = "Introduction", to = "/docs/intro" }]

[[homepage.features]]
title = "Sidebar Driven"
description = "Organize pages into nested categories in <code>sidebars.json</code>."

[[homepage.features]]
title = "Checked Links"
description = "Every sidebar reference is validated before the site is built."

[[homepage.features]]
title = "Static Output"
description = "Plain HTML and CSS, ready for any static host."

[build]
minify = true
"#;

const DEFAULT_SIDEBARS: &str = r#"{
  "tutorialSidebar": [
    "intro",
    {
      "type": "category",
      "label": "Getting Started",
      "items": [
        "getting-started/installation",
        "getting-started/writing-docs"
      ]
    }
  ]
}
"#;

const DEFAULT_INTRO: &str = r#"---
title: Introduction
sidebar_label: Introduction
---

# Welcome to Your Documentation

This is your documentation site, powered by **quire**.

## Next Steps

Read the getting started guide to set up your project.
"#;

const DEFAULT_INSTALLATION: &str = r#"---
title: Installation
---

# Installation

```bash
cargo install quire
```

## Building

```bash
quire build
```

## Previewing

```bash
quire serve
```
"#;

const DEFAULT_WRITING_DOCS: &str = r#"---
title: Writing Docs
---

# Writing Docs

Create `.md` files in the `docs/` directory. Frontmatter is optional:

```markdown
---
title: Page Title
sidebar_label: Short Label
---

# Your Content Here
```

Reference each page from `sidebars.json` by its path without extension.
Run `quire check` to find sidebar entries that point at missing pages.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use quire_static::StaticBuilder;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_a_buildable_project() {
        let temp = tempdir().unwrap();

        run(temp.path(), false).await.unwrap();

        let config = ConfigFile::load(&temp.path().join("quire.toml")).unwrap();
        assert_eq!(config.homepage.features.len(), 3);

        let mut build = config.into_build_config(temp.path());
        build.on_broken_links = quire_nav::Severity::Fail;
        let result = StaticBuilder::new(build).build().await.unwrap();

        assert_eq!(result.pages, 3);
        assert!(temp.path().join("build/docs/intro.html").exists());
    }

    #[tokio::test]
    async fn keeps_existing_docs_without_yes() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/intro.md"), "# Mine\n").unwrap();

        run(temp.path(), false).await.unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join("docs/intro.md")).unwrap(),
            "# Mine\n"
        );
        assert!(!temp.path().join("quire.toml").exists());
    }
}
