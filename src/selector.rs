use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }
        self.attrs.iter().all(|cond| match cond {
            SelectorAttrCondition::Exists { key } => element.attr(key).is_some(),
            SelectorAttrCondition::Eq { key, value } => element.attr(key) == Some(value.as_str()),
        })
    }

    fn id_only(&self) -> Option<&str> {
        if self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty() {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to previous (left) selector part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

/// A comma separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList {
    chains: Vec<Vec<SelectorPart>>,
}

impl SelectorList {
    pub(crate) fn parse(selector: &str) -> Result<Self> {
        let chains = selector
            .split(',')
            .map(parse_selector_chain)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { chains })
    }

    pub(crate) fn matches(&self, dom: &Dom, node_id: NodeId) -> bool {
        self.chains
            .iter()
            .any(|chain| chain_matches(dom, chain, chain.len(), node_id))
    }
}

pub(crate) fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let mut parts = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokenize_selector(trimmed) {
        if token == ">" {
            if pending_combinator == Some(SelectorCombinator::Child) || parts.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(SelectorCombinator::Child);
            continue;
        }

        let step = parse_selector_step(&token)
            .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending_combinator.take().unwrap_or(SelectorCombinator::Descendant))
        };
        parts.push(SelectorPart { step, combinator });
    }

    if pending_combinator.is_some() || parts.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    Ok(parts)
}

fn tokenize_selector(selector: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in selector.chars() {
        match ch {
            '[' => {
                in_brackets = true;
                current.push(ch);
            }
            ']' => {
                in_brackets = false;
                current.push(ch);
            }
            '>' if !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(">".into());
            }
            c if c.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_selector_step(token: &str) -> Option<SelectorStep> {
    let mut step = SelectorStep::default();
    let chars: Vec<char> = token.chars().collect();
    let mut i = 0usize;

    let read_ident = |i: &mut usize| -> String {
        let start = *i;
        while *i < chars.len() && is_ident_char(chars[*i]) {
            *i += 1;
        }
        chars[start..*i].iter().collect()
    };

    if chars.first() == Some(&'*') {
        i += 1;
    } else if chars.first().is_some_and(|c| is_ident_char(*c)) {
        step.tag = Some(read_ident(&mut i).to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let id = read_ident(&mut i);
                if id.is_empty() || step.id.is_some() {
                    return None;
                }
                step.id = Some(id);
            }
            '.' => {
                i += 1;
                let class = read_ident(&mut i);
                if class.is_empty() {
                    return None;
                }
                step.classes.push(class);
            }
            '[' => {
                let close = chars[i..].iter().position(|c| *c == ']')? + i;
                let inner: String = chars[i + 1..close].iter().collect();
                i = close + 1;
                let cond = match inner.split_once('=') {
                    Some((key, value)) => SelectorAttrCondition::Eq {
                        key: key.trim().to_ascii_lowercase(),
                        value: value.trim().trim_matches(['"', '\'']).to_string(),
                    },
                    None => SelectorAttrCondition::Exists {
                        key: inner.trim().to_ascii_lowercase(),
                    },
                };
                step.attrs.push(cond);
            }
            _ => return None,
        }
    }

    Some(step)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn chain_matches(dom: &Dom, chain: &[SelectorPart], len: usize, node_id: NodeId) -> bool {
    let Some(part) = chain.get(len.wrapping_sub(1)) else {
        return false;
    };
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if !part.step.matches(element) {
        return false;
    }
    match part.combinator {
        None => true,
        Some(SelectorCombinator::Child) => dom
            .parent(node_id)
            .is_some_and(|parent| chain_matches(dom, chain, len - 1, parent)),
        Some(SelectorCombinator::Descendant) => {
            let mut cursor = dom.parent(node_id);
            while let Some(ancestor) = cursor {
                if chain_matches(dom, chain, len - 1, ancestor) {
                    return true;
                }
                cursor = dom.parent(ancestor);
            }
            false
        }
    }
}

impl Dom {
    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let list = SelectorList::parse(selector)?;
        if let [chain] = list.chains.as_slice() {
            if let [part] = chain.as_slice() {
                if let Some(id) = part.step.id_only() {
                    return Ok(self.by_id(id));
                }
            }
        }
        Ok(self
            .all_elements()
            .into_iter()
            .find(|node| list.matches(self, *node)))
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self
            .all_elements()
            .into_iter()
            .filter(|node| list.matches(self, *node))
            .collect())
    }
}
