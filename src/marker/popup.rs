use maud::{html, Markup};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::types::landmark::Landmark;

/// Characters that can't appear raw in one path segment of an upload url
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Popup body for a landmark marker
pub fn popup_html(landmark: &Landmark, uploads_base: &str) -> Markup {
    html! {
        div class="popup-content" {
            h5 { (landmark.name) }
            p { (landmark.description.as_deref().unwrap_or_default()) }
            @if let Some(photo) = &landmark.photo {
                img src=(photo_url(uploads_base, photo)) class="img-fluid mb-2" alt=(landmark.name);
            }
            small class="text-muted" {
                "Source: " (landmark.source.as_str())
                @if let Some(category) = &landmark.category {
                    br;
                    "Category: " (category.as_str())
                }
            }
            @if let Some(added_by) = &landmark.added_by {
                br;
                small class="text-muted" { "Added by: " (added_by) }
            }
        }
    }
}

fn photo_url(uploads_base: &str, photo: &str) -> String {
    format!(
        "{}/{}",
        uploads_base.trim_end_matches('/'),
        utf8_percent_encode(photo, PATH_SEGMENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::landmark::{Category, Source};

    fn cafe() -> Landmark {
        Landmark {
            name: "Cafe <Luna>".into(),
            description: Some("Coffee & cake".into()),
            latitude: 10.0,
            longitude: 20.0,
            source: Source::User,
            category: Some(Category::Cultural),
            added_by: Some("ana".into()),
            photo: Some("luna.jpg".into()),
        }
    }

    #[test]
    fn shows_every_present_field() {
        let html = popup_html(&cafe(), "/static/uploads/").into_string();
        assert!(html.contains("<h5>Cafe &lt;Luna&gt;</h5>"));
        assert!(html.contains("<p>Coffee &amp; cake</p>"));
        assert!(html.contains("src=\"/static/uploads/luna.jpg\""));
        assert!(html.contains("Source: user"));
        assert!(html.contains("<br>Category: cultural"));
        assert!(html.contains("Added by: ana"));
    }

    #[test]
    fn omits_missing_optional_fields() {
        let landmark = Landmark {
            description: None,
            source: Source::Wikipedia,
            category: None,
            added_by: None,
            photo: None,
            ..cafe()
        };
        let html = popup_html(&landmark, "/static/uploads").into_string();
        assert!(html.contains("<p></p>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("Category:"));
        assert!(!html.contains("Added by:"));
        assert!(html.contains("Source: wikipedia"));
    }

    #[test]
    fn photo_names_are_percent_encoded() {
        let landmark = Landmark {
            photo: Some("my pic#1.jpg".into()),
            ..cafe()
        };
        let html = popup_html(&landmark, "/static/uploads").into_string();
        assert!(html.contains("src=\"/static/uploads/my%20pic%231.jpg\""), "{html}");
    }
}
