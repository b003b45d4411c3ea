//! Profile tree fixtures written to temporary directories.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use review_profiles::profile::{ProfileCatalog, ProfileLoader};

pub struct CatalogFixture {
    pub root: TempDir,
}

impl CatalogFixture {
    /// A small catalog covering every profile kind, inheritance and a
    /// language base:
    ///
    /// - `python/_base.md`, `javascript/_base.md`, `typescript/_base.md`
    ///   (the TypeScript base extends the JavaScript base)
    /// - `django.md`, `react.md`, `nextjs.md` (extends `react.md`)
    /// - `patterns/rest-api.md` (matched by area type and name)
    /// - `systems/kafka.md`
    pub fn standard() -> Self {
        CatalogBuilder::new()
            .profile(
                "python/_base.md",
                "---\ntype: language\nkeywords: [python]\n---\n\n### Typing\n\n- [ ] Type hints on public functions\n",
            )
            .profile(
                "javascript/_base.md",
                "---\ntype: language\nkeywords: [javascript]\n---\n\n### Equality\n\n- [ ] Use === over ==\n",
            )
            .profile(
                "typescript/_base.md",
                "---\ntype: language\nkeywords: [typescript]\nextends: [javascript/_base.md]\n---\n\n- [ ] No implicit any\n",
            )
            .profile(
                "django.md",
                "---\ntype: framework\nname: django\nkeywords: [django, python]\npriority: 10\n---\n\n### ORM\n\n- [ ] No N+1 queries\n- [x] Use select_related\n",
            )
            .profile(
                "react.md",
                "---\ntype: framework\nkeywords: [react, reactjs, javascript]\npriority: 5\n---\n\n### Hooks\n\n- [ ] Stable dependency arrays\n",
            )
            .profile(
                "nextjs.md",
                "---\ntype: framework\nname: nextjs\nkeywords: [next, typescript]\nextends: [react.md]\npriority: 6\n---\n\n- [ ] Server components fetch data\n",
            )
            .profile(
                "patterns/rest-api.md",
                "---\nkeywords: [rest]\nmatches:\n  area_type: [backend]\n  name_contains: [api]\n---\n\n- [ ] Consistent status codes\n",
            )
            .profile(
                "systems/kafka.md",
                "---\nkeywords: [kafka]\n---\n\n- [ ] Idempotent consumers\n",
            )
            .build()
    }

    pub fn profiles_dir(&self) -> &Path {
        self.root.path()
    }

    /// Write an additional document into the tree.
    pub fn write(&self, relative: &str, content: &str) {
        write_file(self.root.path(), relative, content);
    }

    pub async fn load(&self) -> ProfileCatalog {
        ProfileLoader::new(self.profiles_dir())
            .load()
            .await
            .expect("Failed to load fixture catalog")
    }
}

#[derive(Default)]
pub struct CatalogBuilder {
    files: Vec<(String, String)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> CatalogFixture {
        let root = TempDir::new().expect("Failed to create temp dir");
        for (relative, content) in &self.files {
            write_file(root.path(), relative, content);
        }
        CatalogFixture { root }
    }
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}
