use super::engine::ReviewRule;
use crate::config::ReviewConfig;
use crate::types::*;

// ChangelogRule - app changes must come with a changelog entry
pub struct ChangelogRule<'a> {
    config: &'a ReviewConfig,
}

impl<'a> ChangelogRule<'a> {
    pub fn new(config: &'a ReviewConfig) -> Self {
        Self { config }
    }

    fn failure_text(&self) -> String {
        format!(
            "Please include a CHANGELOG entry. You can find it at <a href='{}'>{}</a>",
            self.config.changelog.link, self.config.files.changelog
        )
    }
}

impl<'a> ReviewRule for ChangelogRule<'a> {
    fn evaluate(&self, ctx: &ReviewContext) -> Vec<Annotation> {
        let has_app_changes = ctx.changes.app_files().next().is_some();
        if has_app_changes && !ctx.changes.changelog_changed() {
            vec![Annotation::failure(self.failure_text())]
        } else {
            Vec::new()
        }
    }

    fn name(&self) -> &str {
        "Changelog"
    }
}
