//! Parse nodes produced by combinators
//!
//! Every successful match yields a `ParseNode`. The four generic shapes mirror
//! the combinator that produced them; `Value` holds whatever a transform hook
//! returned in their place. Enclosing combinators never look inside a `Value`.

/// A node in the parse tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode<T> {
    /// Text matched by a literal combinator
    Literal(String),
    /// Character matched by a character-class combinator
    Char(char),
    /// Children of a sequence, in order
    Sequence(Vec<ParseNode<T>>),
    /// Children of a repetition, one per successful match
    Repetition(Vec<ParseNode<T>>),
    /// Domain value produced by a transform hook
    Value(T),
}

impl<T> ParseNode<T> {
    /// Short name of the node's shape
    pub fn kind(&self) -> &'static str {
        match self {
            ParseNode::Literal(_) => "Literal",
            ParseNode::Char(_) => "Char",
            ParseNode::Sequence(_) => "Sequence",
            ParseNode::Repetition(_) => "Repetition",
            ParseNode::Value(_) => "Value",
        }
    }

    /// Take the domain value out of a `Value` node
    pub fn into_value(self) -> Option<T> {
        match self {
            ParseNode::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            ParseNode::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            ParseNode::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ParseNode::Literal(text) => Some(text),
            _ => None,
        }
    }

    /// Children of a sequence or repetition; empty for every other shape
    pub fn children(&self) -> &[ParseNode<T>] {
        match self {
            ParseNode::Sequence(children) | ParseNode::Repetition(children) => children,
            _ => &[],
        }
    }

    /// Owned children of a sequence or repetition
    pub fn into_children(self) -> Option<Vec<ParseNode<T>>> {
        match self {
            ParseNode::Sequence(children) | ParseNode::Repetition(children) => Some(children),
            _ => None,
        }
    }

    /// The source text this node matched.
    ///
    /// Only generic nodes remember their text: returns `None` as soon as a
    /// `Value` appears anywhere below this node.
    pub fn matched_text(&self) -> Option<String> {
        let mut text = String::new();
        self.collect_text(&mut text).then_some(text)
    }

    fn collect_text(&self, out: &mut String) -> bool {
        match self {
            ParseNode::Literal(text) => {
                out.push_str(text);
                true
            }
            ParseNode::Char(c) => {
                out.push(*c);
                true
            }
            ParseNode::Sequence(children) | ParseNode::Repetition(children) => {
                children.iter().all(|child| child.collect_text(out))
            }
            ParseNode::Value(_) => false,
        }
    }
}
