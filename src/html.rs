use super::*;

/// Parses page markup into a [`Dom`].
///
/// Understands start/end tags, void elements, comments, doctype and the
/// raw-text elements `script` and `style`. An end tag closes up to the
/// nearest open element with the same name; end tags with no open match are
/// dropped.
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut open = vec![dom.root];
    let mut cur = Cursor::new(html);

    while !cur.at_end() {
        if cur.eat("<!--") {
            cur.skip_past("-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
        } else if cur.eat("<!") {
            cur.skip_past(">")
                .ok_or_else(|| Error::HtmlParse("unclosed doctype".into()))?;
        } else if cur.eat("</") {
            let tag = end_tag(&mut cur)?;
            let matched = open
                .iter()
                .rposition(|node| dom.tag_name(*node) == Some(tag.as_str()))
                .filter(|depth| *depth > 0);
            if let Some(depth) = matched {
                open.truncate(depth);
            }
        } else if cur.rest().starts_with('<') {
            let parent = open.last().copied().unwrap_or(dom.root);
            let tag = start_tag(&mut cur)?;
            let node = dom.create_element(parent, tag.name.clone(), tag.attrs);

            if tag.self_closing || is_void_tag(&tag.name) {
                continue;
            }
            if matches!(tag.name.as_str(), "script" | "style") {
                let body = cur
                    .raw_text_until_close(&tag.name)
                    .ok_or_else(|| Error::HtmlParse(format!("unclosed <{}>", tag.name)))?;
                if !body.is_empty() {
                    dom.create_text(node, body.to_string());
                }
                cur.eat("</");
                end_tag(&mut cur)?;
            } else {
                open.push(node);
            }
        } else {
            let text = cur.take_while(|c| c != '<');
            let parent = open.last().copied().unwrap_or(dom.root);
            dom.create_text(parent, decode_entities(text));
        }
    }

    Ok(dom)
}

struct StartTag {
    name: String,
    attrs: Vec<(String, String)>,
    self_closing: bool,
}

fn start_tag(cur: &mut Cursor<'_>) -> Result<StartTag> {
    cur.eat("<");
    cur.skip_ws();
    let name = cur.take_while(is_name_char).to_ascii_lowercase();
    if name.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs: Vec<(String, String)> = Vec::new();
    loop {
        cur.skip_ws();
        if cur.at_end() {
            return Err(Error::HtmlParse(format!("unclosed <{name}> start tag")));
        }
        if cur.eat(">") {
            return Ok(StartTag {
                name,
                attrs,
                self_closing: false,
            });
        }
        if cur.eat("/>") {
            return Ok(StartTag {
                name,
                attrs,
                self_closing: true,
            });
        }

        let key = cur
            .take_while(|c| is_name_char(c) || c == ':')
            .to_ascii_lowercase();
        if key.is_empty() {
            return Err(Error::HtmlParse(format!("invalid attribute name in <{name}>")));
        }
        cur.skip_ws();
        let value = if cur.eat("=") {
            cur.skip_ws();
            decode_entities(attr_value(cur)?)
        } else {
            String::new()
        };
        // First occurrence wins.
        if attrs.iter().all(|(existing, _)| *existing != key) {
            attrs.push((key, value));
        }
    }
}

fn attr_value<'a>(cur: &mut Cursor<'a>) -> Result<&'a str> {
    for quote in ["\"", "'"] {
        if cur.eat(quote) {
            return cur
                .skip_past(quote)
                .ok_or_else(|| Error::HtmlParse("unclosed quoted attribute value".into()));
        }
    }
    let value = cur.take_while(|c| !c.is_ascii_whitespace() && c != '>');
    if value.is_empty() {
        return Err(Error::HtmlParse("missing attribute value".into()));
    }
    Ok(value)
}

/// Reads the name of an end tag whose `</` is already consumed.
fn end_tag(cur: &mut Cursor<'_>) -> Result<String> {
    cur.skip_ws();
    let name = cur.take_while(is_name_char).to_ascii_lowercase();
    cur.skip_past(">")
        .ok_or_else(|| Error::HtmlParse(format!("unclosed </{name}>")))?;
    Ok(name)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Position in the markup; always on a char boundary.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn eat(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        self.take_while(|c| c.is_ascii_whitespace());
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !keep(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Returns the text before `needle` and moves past it.
    fn skip_past(&mut self, needle: &str) -> Option<&'a str> {
        let rest = self.rest();
        let at = rest.find(needle)?;
        self.pos += at + needle.len();
        Some(&rest[..at])
    }

    /// Returns raw text up to `</tag` (any case), leaving the cursor on it.
    fn raw_text_until_close(&mut self, tag: &str) -> Option<&'a str> {
        let rest = self.rest();
        let at = rest.to_ascii_lowercase().find(&format!("</{tag}"))?;
        self.pos += at;
        Some(&rest[..at])
    }
}

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .and_then(|end| entity_char(&rest[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity_char(name: &str) -> Option<char> {
    let named = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "hellip" => '…',
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            return char::from_u32(code);
        }
    };
    Some(named)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_and_stray_end_tags() -> Result<()> {
        let dom = parse_html("<div id='a'><p>one</span></p><br/><em>two</div>")?;
        let a = dom.by_id("a").ok_or_else(|| Error::SelectorNotFound("#a".into()))?;
        assert_eq!(dom.text_content(a), "onetwo");
        assert_eq!(dom.query_selector_all("div > p")?.len(), 1);
        assert_eq!(dom.query_selector_all("div > em")?.len(), 1);
        Ok(())
    }

    #[test]
    fn attributes_quoting_and_duplicates() -> Result<()> {
        let dom = parse_html(r#"<input id=x type='text' ID="y" disabled value="a &amp; b">"#)?;
        let x = dom.by_id("x").ok_or_else(|| Error::SelectorNotFound("#x".into()))?;
        assert_eq!(dom.attr(x, "disabled").as_deref(), Some(""));
        assert_eq!(dom.value(x)?, "a & b");
        assert!(dom.by_id("y").is_none());
        Ok(())
    }

    #[test]
    fn raw_text_keeps_markup_inside_script() -> Result<()> {
        let dom = parse_html("<script>if (a < b) { x = '<p>'; }</SCRIPT><p id='after'>ok</p>")?;
        assert_eq!(dom.query_selector_all("p")?.len(), 1);
        let script = dom.query_selector("script")?.ok_or_else(|| Error::SelectorNotFound("script".into()))?;
        assert_eq!(dom.text_content(script), "if (a < b) { x = '<p>'; }");
        Ok(())
    }

    #[test]
    fn entities_decode_named_and_numeric() {
        assert_eq!(decode_entities("&copy; &#65;&#x42; &bogus; a&b"), "© AB &bogus; a&b");
    }

    #[test]
    fn malformed_markup_is_rejected() {
        for html in ["<!-- open", "<!doctype", "<div class=\"x>", "<div", "< >", "<p></p"] {
            assert!(
                matches!(parse_html(html), Err(Error::HtmlParse(_))),
                "expected parse error for {html:?}"
            );
        }
    }
}
