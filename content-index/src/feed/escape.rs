/// Escapes the five XML-significant characters.
///
/// `&` is replaced before anything else can introduce an entity, so the
/// entities produced here are never escaped a second time within one call.
/// Text that already contains entities is escaped again: `&amp;` becomes
/// `&amp;amp;`.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
