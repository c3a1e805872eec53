use html_escape::encode_double_quoted_attribute;

/// Injects a `<base href>` directive so relative links and assets in a
/// retrieved document resolve against the site it came from.
///
/// Not idempotent: normalizing the output again adds a second directive.
#[derive(Debug, Clone, Default)]
pub struct DocumentNormalizer;

impl DocumentNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, markup: &str, source_url: &str) -> String {
        let base = Self::base_directive(source_url);

        match find_head_open(markup) {
            Some(end) => {
                let mut out = String::with_capacity(markup.len() + base.len());
                out.push_str(&markup[..end]);
                out.push_str(&base);
                out.push_str(&markup[end..]);
                out
            }
            None => base + markup,
        }
    }

    pub fn base_directive(source_url: &str) -> String {
        format!(
            "<base href=\"{}\">",
            encode_double_quoted_attribute(source_url)
        )
    }
}

/// Byte offset just past the first `<head>` / `<head ...>` opening tag.
/// `<header>` and friends do not count.
fn find_head_open(markup: &str) -> Option<usize> {
    let bytes = markup.as_bytes();
    let mut from = 0;

    while let Some(pos) = markup[from..].find('<').map(|p| p + from) {
        let name_end = pos + 5;
        if bytes.len() > name_end
            && bytes[pos + 1..name_end].eq_ignore_ascii_case(b"head")
            && (bytes[name_end] == b'>' || bytes[name_end].is_ascii_whitespace())
        {
            return markup[name_end..].find('>').map(|gt| name_end + gt + 1);
        }
        from = pos + 1;
    }

    None
}
