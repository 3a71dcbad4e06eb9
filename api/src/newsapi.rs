/// Wire types for the NewsAPI everything endpoint.
/// Mapped to the clean NewsArticle type in client.rs.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct NewsResponse {
    #[serde(default)]
    pub articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiArticle {
    pub source: Option<NewsApiSource>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NewsApiSource {
    pub id: Option<String>,
    pub name: Option<String>,
}
