use crate::constants::{articles, pagination};
use crate::errors::ToolError;
use crate::services::logger::Logger;
use crate::services::qiita_client::{ArticleUpdate, NewArticle, QiitaClient};
use crate::services::response_filter::{filter_article_list, filter_single_article};
use crate::services::tool_executor::ToolHandler;
use crate::services::validation::Validation;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleAction {
    ListMine,
    Get,
    Create,
    Update,
}

impl ArticleAction {
    pub const ALL: [ArticleAction; 4] = [
        ArticleAction::ListMine,
        ArticleAction::Get,
        ArticleAction::Create,
        ArticleAction::Update,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            ArticleAction::ListMine => "get_my_qiita_articles",
            ArticleAction::Get => "get_qiita_article",
            ArticleAction::Create => "post_qiita_article",
            ArticleAction::Update => "update_qiita_article",
        }
    }
}

#[derive(Clone)]
pub struct ArticleManager {
    logger: Logger,
    validation: Validation,
    client: Arc<QiitaClient>,
}

impl ArticleManager {
    pub fn new(logger: Logger, validation: Validation, client: Arc<QiitaClient>) -> Self {
        Self {
            logger: logger.child("articles"),
            validation,
            client,
        }
    }

    pub async fn handle_action(&self, action: ArticleAction, args: Value) -> Result<String, ToolError> {
        match action {
            ArticleAction::ListMine => self.list_mine(&args).await,
            ArticleAction::Get => self.get(&args).await,
            ArticleAction::Create => self.create(&args).await,
            ArticleAction::Update => self.update(&args).await,
        }
    }

    async fn list_mine(&self, args: &Value) -> Result<String, ToolError> {
        let page = self.validation.ensure_positive_int(
            args.get("page"),
            "page",
            pagination::DEFAULT_PAGE,
            pagination::MAX_PAGE,
        )?;
        let per_page = self.validation.ensure_positive_int(
            args.get("per_page"),
            "per_page",
            pagination::DEFAULT_PER_PAGE,
            pagination::MAX_PER_PAGE,
        )?;
        let items = self
            .client
            .list_authenticated_user_items(page, per_page)
            .await?;
        self.logger.debug(
            "listed articles",
            Some(&serde_json::json!({"page": page.get(), "per_page": per_page.get(), "count": items.len()})),
        );
        render_json(&Value::Array(filter_article_list(&items)))
    }

    async fn get(&self, args: &Value) -> Result<String, ToolError> {
        let id = self.validation.ensure_item_id(args.get("item_id"), "item_id")?;
        let item = self.client.get_item(&id).await?;
        render_json(&filter_single_article(&item))
    }

    async fn create(&self, args: &Value) -> Result<String, ToolError> {
        let article = NewArticle {
            title: self.validation.ensure_string(
                args.get("title").unwrap_or(&Value::Null),
                "title",
                false,
            )?,
            body: self.validation.ensure_text(args.get("body"), "body")?,
            tags: self.validation.ensure_tags(args.get("tags"), "tags")?,
            private: Some(
                self.validation
                    .ensure_optional_bool(args.get("private"), "private")?
                    .unwrap_or(articles::DEFAULT_PRIVATE),
            ),
            tweet: self.validation.ensure_optional_bool(args.get("tweet"), "tweet")?,
            organization_url_name: self.validation.ensure_optional_string(
                args.get("organization_url_name"),
                "organization_url_name",
                true,
            )?,
            slide: self.validation.ensure_optional_bool(args.get("slide"), "slide")?,
        };
        let created = filter_single_article(&self.client.create_item(&article).await?);
        self.logger.info(
            "article created",
            Some(&serde_json::json!({"id": created.get("id"), "private": article.private})),
        );
        render_with_summary("Article created", &article.title, &created)
    }

    async fn update(&self, args: &Value) -> Result<String, ToolError> {
        let id = self.validation.ensure_item_id(args.get("item_id"), "item_id")?;
        let update = ArticleUpdate {
            title: self.validation.ensure_string(
                args.get("title").unwrap_or(&Value::Null),
                "title",
                false,
            )?,
            body: self.validation.ensure_text(args.get("body"), "body")?,
            tags: self.validation.ensure_optional_tags(args.get("tags"), "tags")?,
            private: self.validation.ensure_optional_bool(args.get("private"), "private")?,
            organization_url_name: self.validation.ensure_optional_string(
                args.get("organization_url_name"),
                "organization_url_name",
                true,
            )?,
            slide: self.validation.ensure_optional_bool(args.get("slide"), "slide")?,
        };
        let updated = filter_single_article(&self.client.update_item(&id, &update).await?);
        self.logger.info("article updated", Some(&serde_json::json!({"id": id.as_str()})));
        render_with_summary("Article updated", &update.title, &updated)
    }
}

fn render_json(value: &Value) -> Result<String, ToolError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| ToolError::internal(format!("Failed to serialize response: {}", err)))
}

fn render_with_summary(headline: &str, requested_title: &str, item: &Value) -> Result<String, ToolError> {
    let title = item
        .get("title")
        .and_then(|v| v.as_str())
        .unwrap_or(requested_title);
    let url = item
        .get("url")
        .and_then(|v| v.as_str())
        .unwrap_or("(unknown)");
    Ok(format!(
        "{}: {}\nURL: {}\n\n{}",
        headline,
        title,
        url,
        render_json(item)?
    ))
}

/// Binds one [`ArticleAction`] to the tool name the agent calls.
#[derive(Clone)]
pub struct ArticleTool {
    manager: Arc<ArticleManager>,
    action: ArticleAction,
}

impl ArticleTool {
    pub fn new(manager: Arc<ArticleManager>, action: ArticleAction) -> Self {
        Self { manager, action }
    }
}

#[async_trait::async_trait]
impl ToolHandler for ArticleTool {
    async fn handle(&self, args: Value) -> Result<String, ToolError> {
        self.manager.handle_action(self.action, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_prefers_server_title_and_url() {
        let item = json!({"title": "Server title", "url": "https://qiita.com/a/items/1"});
        let text = render_with_summary("Article created", "Requested", &item).expect("render");
        assert!(text.starts_with("Article created: Server title\nURL: https://qiita.com/a/items/1\n\n{"));
    }

    #[test]
    fn summary_falls_back_to_requested_title() {
        let text = render_with_summary("Article updated", "Requested", &json!({})).expect("render");
        assert!(text.starts_with("Article updated: Requested\nURL: (unknown)\n\n"));
    }

    #[test]
    fn tool_names_are_distinct() {
        let mut names: Vec<&str> = ArticleAction::ALL.iter().map(|a| a.tool_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ArticleAction::ALL.len());
    }
}
