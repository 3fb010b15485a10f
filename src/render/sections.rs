//! Markup builders for structured sections

use crate::i18n::TimelineEntry;
use crate::markup::{Document, Element, NodeId};

/// Replace the container's children with one `<li>` per item
pub fn render_list(doc: &mut Document, container: NodeId, items: &[String]) {
    doc.clear_children(container);
    for item in items {
        doc.append_text_element(container, Element::new("li"), item);
    }
}

/// Replace the container's children with one timeline item per entry
///
/// ```text
/// div.timeline-item
///   div.timeline-header > h3{title} span.date{date}
///   div.timeline-content > p.<subtitle_class>{subtitle} p.details{details}
/// ```
pub fn render_timeline(
    doc: &mut Document,
    container: NodeId,
    entries: &[TimelineEntry],
    subtitle_class: &str,
) {
    doc.clear_children(container);
    for entry in entries {
        let item = doc.append_element(container, Element::new("div").with_class("timeline-item"));

        let header = doc.append_element(item, Element::new("div").with_class("timeline-header"));
        doc.append_text_element(header, Element::new("h3"), &entry.title);
        doc.append_text_element(header, Element::new("span").with_class("date"), &entry.date);

        let content = doc.append_element(item, Element::new("div").with_class("timeline-content"));
        doc.append_text_element(
            content,
            Element::new("p").with_class(subtitle_class),
            &entry.subtitle,
        );
        doc.append_text_element(content, Element::new("p").with_class("details"), &entry.details);
    }
}

/// Set the text of the i-th item to the i-th label; extra items keep their text
pub fn render_items(doc: &mut Document, items: &[NodeId], labels: &[String]) {
    for (item, label) in items.iter().zip(labels) {
        doc.set_text(*item, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> TimelineEntry {
        TimelineEntry {
            title: title.to_string(),
            date: "2021.09-2025.07".to_string(),
            subtitle: "商业分析 | 本科".to_string(),
            details: "GPA 3.05/4".to_string(),
        }
    }

    #[test]
    fn test_timeline_markup() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let timeline = doc.append_element(body, Element::new("div").with_class("timeline"));

        render_timeline(&mut doc, timeline, &[entry("澳门科技大学")], "major");

        assert_eq!(
            doc.inner_html(timeline),
            "<div class=\"timeline-item\">\
             <div class=\"timeline-header\"><h3>澳门科技大学</h3><span class=\"date\">2021.09-2025.07</span></div>\
             <div class=\"timeline-content\"><p class=\"major\">商业分析 | 本科</p><p class=\"details\">GPA 3.05/4</p></div>\
             </div>"
        );
    }

    #[test]
    fn test_list_replaces_previous_items() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let list = doc.append_element(body, Element::new("ul"));

        render_list(&mut doc, list, &["a".to_string(), "b".to_string(), "c".to_string()]);
        render_list(&mut doc, list, &["d".to_string()]);

        assert_eq!(doc.inner_html(list), "<li>d</li>");
    }

    #[test]
    fn test_items_beyond_labels_are_untouched() {
        let mut doc = Document::skeleton();
        let body = doc.body().unwrap();
        let a = doc.append_text_element(body, Element::new("li"), "one");
        let b = doc.append_text_element(body, Element::new("li"), "two");

        render_items(&mut doc, &[a, b], &["Home".to_string()]);

        assert_eq!(doc.text_content(a), "Home");
        assert_eq!(doc.text_content(b), "two");
    }
}
