/// Extract the target id from a same-page anchor href. Only bare fragments
/// qualify; a lone `#` and anything that is not a fragment reference return
/// `None` and are left to default navigation.
pub fn anchor_id(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() { None } else { Some(id) }
}
