use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    // Source order is kept so dumps are stable.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) style: Vec<(String, String)>,
    pub(crate) value: String,
}

impl Element {
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    pub(crate) fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn set_attr(&mut self, name: &str, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let value = attrs
            .iter()
            .find(|(key, _)| key == "value")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        let style = attrs
            .iter()
            .find(|(key, _)| key == "style")
            .map(|(_, raw)| parse_inline_style(raw))
            .unwrap_or_default();
        let id_attr = attrs
            .iter()
            .find(|(key, _)| key == "id")
            .map(|(_, id)| id.clone());
        let element = Element {
            tag_name,
            attrs,
            style,
            value,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = id_attr {
            // First element with a given id wins, as getElementById does.
            self.id_index.entry(id_attr).or_insert(id);
        }
        id
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Result<&mut Element> {
        match self.nodes.get_mut(node_id.0).map(|node| &mut node.node_type) {
            Some(NodeType::Element(element)) => Ok(element),
            _ => Err(Error::TypeMismatch {
                selector: format!("node#{}", node_id.0),
                expected: "element".into(),
                actual: "non-element".into(),
            }),
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attr(name))
            .map(str::to_string)
    }

    pub(crate) fn id_label(&self, node_id: NodeId) -> String {
        match self.element(node_id) {
            Some(element) => match element.attr("id") {
                Some(id) => format!("#{id}"),
                None => element.tag_name.clone(),
            },
            None => "#document".into(),
        }
    }

    pub(crate) fn has_class(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .map(|element| element.has_class(class_name))
            .unwrap_or(false)
    }

    pub(crate) fn class_list(&self, node_id: NodeId) -> Vec<String> {
        self.element(node_id)
            .map(Element::classes)
            .unwrap_or_default()
    }

    /// Adds or removes one class, leaving the others in place.
    pub(crate) fn set_class(&mut self, node_id: NodeId, class_name: &str, on: bool) -> Result<()> {
        let element = self.element_mut(node_id)?;
        let mut classes = element.classes();
        let present = classes.iter().any(|c| c == class_name);
        if on == present {
            return Ok(());
        }
        if on {
            classes.push(class_name.to_string());
        } else {
            classes.retain(|c| c != class_name);
        }
        if classes.is_empty() {
            element.remove_attr("class");
        } else {
            element.set_attr("class", classes.join(" "));
        }
        Ok(())
    }

    pub(crate) fn style(&self, node_id: NodeId, property: &str) -> Option<String> {
        self.element(node_id).and_then(|element| {
            element
                .style
                .iter()
                .find(|(key, _)| key == property)
                .map(|(_, value)| value.clone())
        })
    }

    /// An empty value removes the declaration, like assigning `''` to a
    /// style property.
    pub(crate) fn set_style(&mut self, node_id: NodeId, property: &str, value: &str) -> Result<()> {
        let element = self.element_mut(node_id)?;
        if value.is_empty() {
            element.style.retain(|(key, _)| key != property);
        } else if let Some(slot) = element.style.iter_mut().find(|(key, _)| key == property) {
            slot.1 = value.to_string();
        } else {
            element.style.push((property.to_string(), value.to_string()));
        }
        let serialized = serialize_inline_style(&element.style);
        if serialized.is_empty() {
            element.remove_attr("style");
        } else {
            element.set_attr("style", serialized);
        }
        Ok(())
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        self.element(node_id)
            .map(|element| element.value.clone())
            .ok_or_else(|| Error::TypeMismatch {
                selector: self.id_label(node_id),
                expected: "element".into(),
                actual: "non-element".into(),
            })
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self.element_mut(node_id)?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document | NodeType::Element(_) => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.text_content(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        self.element_mut(node_id)?;
        self.detach_children(node_id);
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        Ok(())
    }

    /// Replaces the children with text runs separated by `<br>` elements.
    pub(crate) fn set_lines(&mut self, node_id: NodeId, lines: &[String]) -> Result<()> {
        self.element_mut(node_id)?;
        self.detach_children(node_id);
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                self.create_element(node_id, "br".into(), Vec::new());
            }
            if !line.is_empty() {
                self.create_text(node_id, line.clone());
            }
        }
        Ok(())
    }

    /// Detached nodes leave the id index; a connected element carrying the
    /// same id takes the slot over.
    fn detach_children(&mut self, node_id: NodeId) {
        let children = std::mem::take(&mut self.nodes[node_id.0].children);
        let mut removed = Vec::new();
        for child in children {
            self.nodes[child.0].parent = None;
            self.collect_subtree(child, &mut removed);
        }

        let stale: Vec<String> = self
            .id_index
            .iter()
            .filter(|(_, node)| removed.contains(node))
            .map(|(id, _)| id.clone())
            .collect();
        for id in stale {
            self.id_index.remove(&id);
            let replacement = self.all_elements().into_iter().find(|node| {
                self.element(*node).and_then(|element| element.attr("id")) == Some(id.as_str())
            });
            if let Some(node) = replacement {
                self.id_index.insert(id, node);
            }
        }
    }

    fn collect_subtree(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        out.push(node_id);
        for child in &self.nodes[node_id.0].children {
            self.collect_subtree(*child, out);
        }
    }

    pub(crate) fn next_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|id| *id == node_id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|id| self.element(*id).is_some())
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self
                .tag_name(current)
                .is_some_and(|t| t.eq_ignore_ascii_case(tag))
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// Attached elements in document order.
    pub(crate) fn all_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements_dfs(self.root, &mut out);
        out
    }

    fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            if self.element(*child).is_some() {
                out.push(*child);
            }
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn body(&self) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|id| self.tag_name(*id) == Some("body"))
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.dump_node(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
            NodeType::Element(element) => {
                let mut out = String::new();
                out.push('<');
                out.push_str(&element.tag_name);
                for (k, v) in &element.attrs {
                    out.push(' ');
                    out.push_str(k);
                    out.push_str("=\"");
                    out.push_str(v);
                    out.push('"');
                }
                out.push('>');
                if is_void_tag(&element.tag_name) {
                    return out;
                }
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.dump_node(*child));
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
                out
            }
        }
    }
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

fn parse_inline_style(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name, value.to_string()))
            }
        })
        .collect()
}

fn serialize_inline_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}
