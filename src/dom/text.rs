/// Reports whether a serialized HTML fragment has any non-whitespace character
/// outside of angle-bracketed tag spans.
///
/// This is a textual approximation of "renders some text": CSS visibility is
/// not evaluated, so text hidden by styles still counts.
pub fn has_any_visible_text(html: &str) -> bool {
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag && !c.is_whitespace() => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_visible_text() {
        let cases = [
            ("<div></div>", false),
            ("<div> </div>", false),
            ("<div>text</div>", true),
            ("<div><span> t </span></div>", true),
            ("<div><span></span>\n\t</div>", false),
            ("<div>한</div>", true),
            ("", false),
        ];

        for (html, want) in cases {
            assert_eq!(has_any_visible_text(html), want, "for {:?}", html);
        }
    }

    #[test]
    fn test_attribute_text_is_not_visible() {
        assert!(!has_any_visible_text(r#"<div class="inactiveDepth" title="hello"></div>"#));
    }

    #[test]
    fn test_unicode_whitespace_is_not_text() {
        assert!(!has_any_visible_text("<p>\u{00a0}\u{3000}</p>"));
    }
}
