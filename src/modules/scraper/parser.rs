use crate::modules::catalog::domain::entities::{
    AuthorInfo, BookInfo, ALADIN_MANAGE_ID_PREFIX,
};
use crate::shared::errors::{AppError, AppResult};
use regex::Regex;
use std::collections::HashMap;

const TITLE_SUFFIX: &str = " : 알라딘";

/// Extracts author and book records from an Aladin product page
pub struct AladinPageParser {
    meta_tag: Regex,
    attribute: Regex,
    info_list: Regex,
    list_item: Regex,
    tag: Regex,
    page_count: Regex,
    weight: Regex,
    isbn_text: Regex,
}

fn compile(pattern: &str) -> AppResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| AppError::InternalError(format!("Invalid pattern {}: {}", pattern, e)))
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

impl AladinPageParser {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            meta_tag: compile(r"(?is)<meta\s[^>]*>")?,
            attribute: compile(r#"(?s)([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)?,
            info_list: compile(
                r#"(?is)<[a-z]+[^>]*class\s*=\s*["'][^"']*\bconts_info_list1\b[^"']*["'][^>]*>(.*?)</(?:ul|div)>"#,
            )?,
            list_item: compile(r"(?is)<li[^>]*>(.*?)</li>")?,
            tag: compile(r"(?s)<[^>]+>")?,
            page_count: compile(r"(\d+)\s*쪽")?,
            weight: compile(r"(\d+(?:\.\d+)?)\s*g\b")?,
            isbn_text: compile(r"ISBN\s*:\s*([0-9Xx]+)")?,
        })
    }

    /// `property`/`name` -> `content` for every `<meta>` tag on the page
    fn meta_properties(&self, html: &str) -> HashMap<String, String> {
        let mut properties = HashMap::new();
        for tag in self.meta_tag.find_iter(html) {
            let mut key = None;
            let mut content = None;
            for attr in self.attribute.captures_iter(tag.as_str()) {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                match attr[1].to_ascii_lowercase().as_str() {
                    "property" | "name" => key = Some(value.to_string()),
                    "content" => content = Some(decode_entities(value)),
                    _ => {}
                }
            }
            if let (Some(key), Some(content)) = (key, content) {
                properties.entry(key).or_insert(content);
            }
        }
        properties
    }

    /// Plain-text items of the product detail list (page count, size, weight, ISBN)
    fn info_items(&self, html: &str) -> Vec<String> {
        let Some(list) = self.info_list.captures(html) else {
            return Vec::new();
        };
        self.list_item
            .captures_iter(&list[1])
            .map(|item| {
                let text = self.tag.replace_all(&item[1], " ");
                decode_entities(text.split_whitespace().collect::<Vec<_>>().join(" ").as_str())
            })
            .collect()
    }

    /// Returns `None` when no ISBN can be found anywhere on the page.
    pub fn parse(&self, html: &str) -> Option<(AuthorInfo, BookInfo)> {
        let meta = self.meta_properties(html);
        let items = self.info_items(html);
        let non_empty = |key: &str| {
            meta.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let isbn = non_empty("books:isbn").or_else(|| {
            items
                .iter()
                .filter(|item| item.contains("ISBN"))
                .find_map(|item| self.isbn_text.captures(item).map(|c| c[1].to_string()))
        })?;

        let title = non_empty("og:title").map(|t| t.replace(TITLE_SUFFIX, "").trim().to_string());
        let cover_image = non_empty("og:image");
        let price = Some(
            meta.get("og:price")
                .and_then(|p| p.trim().replace(',', "").parse::<f64>().ok())
                .unwrap_or(0.0),
        );

        let page_count = items
            .iter()
            .find_map(|item| self.page_count.captures(item))
            .and_then(|c| c[1].parse::<i32>().ok());
        let dimensions = items.iter().find(|item| item.contains("mm")).cloned();
        let weight = items
            .iter()
            .filter(|item| !item.contains("mm"))
            .find_map(|item| self.weight.captures(item))
            .and_then(|c| c[1].parse::<f64>().ok());

        let author_info = AuthorInfo {
            name: non_empty("og:author"),
            description: None,
        };
        let book_info = BookInfo {
            book_manage_id: Some(format!("{}{}", ALADIN_MANAGE_ID_PREFIX, isbn)),
            title,
            isbn: Some(isbn),
            description: meta.get("og:description").cloned(),
            price,
            quantity: Some(0),
            page_count,
            dimensions,
            weight,
            publisher_image: cover_image.clone(),
            cover_image,
            table_of_contents: None,
            introduction: None,
        };

        Some((author_info, book_info))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta property="og:title" content="소년이 온다 : 알라딘" />
  <meta property="og:author" content="한강">
  <meta property="og:description" content="&quot;상처의 복원&quot;을 향한 이야기">
  <meta content="15000" property="og:price">
  <meta property="og:image" content="https://image.aladin.co.kr/product/4086/97/cover500/8936434128_2.jpg">
  <meta property="books:isbn" content="9788936434120">
</head>
<body>
  <div class="conts_info_list1">
    <ul>
      <li>216쪽</li>
      <li>134*205mm</li>
      <li>317g</li>
      <li>ISBN : 9788936434120</li>
    </ul>
  </div>
</body>
</html>"#;

    #[test]
    fn parses_meta_and_detail_list() {
        let parser = AladinPageParser::new().unwrap();
        let (author, book) = parser.parse(SAMPLE_PAGE).unwrap();

        assert_eq!(author.name.as_deref(), Some("한강"));
        assert_eq!(author.description, None);

        assert_eq!(book.title.as_deref(), Some("소년이 온다"));
        assert_eq!(book.isbn.as_deref(), Some("9788936434120"));
        assert_eq!(book.book_manage_id.as_deref(), Some("ALADIN_9788936434120"));
        assert_eq!(book.description.as_deref(), Some("\"상처의 복원\"을 향한 이야기"));
        assert_eq!(book.price, Some(15000.0));
        assert_eq!(book.quantity, Some(0));
        assert_eq!(book.page_count, Some(216));
        assert_eq!(book.dimensions.as_deref(), Some("134*205mm"));
        assert_eq!(book.weight, Some(317.0));
        assert_eq!(book.cover_image, book.publisher_image);
        assert!(book
            .cover_image
            .as_deref()
            .unwrap()
            .ends_with("8936434128_2.jpg"));
    }

    #[test]
    fn falls_back_to_isbn_in_detail_list() {
        let parser = AladinPageParser::new().unwrap();
        let html = SAMPLE_PAGE.replace(
            r#"<meta property="books:isbn" content="9788936434120">"#,
            "",
        );

        let (_, book) = parser.parse(&html).unwrap();
        assert_eq!(book.isbn.as_deref(), Some("9788936434120"));
    }

    #[test]
    fn page_without_isbn_yields_nothing() {
        let parser = AladinPageParser::new().unwrap();
        let html = r#"<html><head><meta property="og:title" content="검색 결과 : 알라딘"></head></html>"#;
        assert!(parser.parse(html).is_none());
    }

    #[test]
    fn missing_price_defaults_to_zero() {
        let parser = AladinPageParser::new().unwrap();
        let html = r#"<meta property="books:isbn" content="890127258X">"#;
        let (author, book) = parser.parse(html).unwrap();

        assert_eq!(book.price, Some(0.0));
        assert_eq!(book.title, None);
        assert_eq!(author.name, None);
        assert_eq!(book.page_count, None);
    }
}
