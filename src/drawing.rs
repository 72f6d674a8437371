//! Drawable shapes of queues
//!
//! A [`TreeDrawing`] is a plain labelled tree describing the current shape of
//! a queue: the forest of a binomial queue hangs under an unlabelled root, and
//! a skew heap keeps its left/right structure with [`TreeDrawing::Empty`]
//! placeholders. Drawings compare structurally, which is how tests assert the
//! exact shape an operation produced.
//!
//! [`TreeDrawing::render_with`] lays a drawing out as indented text; the
//! [`DrawStyle`] passed to it plays the part a font plays for a graphical
//! drawing.

use std::fmt;

/// Rendering options for [`TreeDrawing::render_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawStyle {
    /// Width of the horizontal branch drawn in front of each child.
    pub indent: usize,
    /// Text printed for an empty subtree placeholder.
    pub empty_label: String,
    /// Text printed for a node whose label is the empty string.
    pub unlabeled: String,
    /// Use plain ASCII branches instead of box-drawing characters.
    pub ascii: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        DrawStyle {
            indent: 2,
            empty_label: "-".to_string(),
            unlabeled: "*".to_string(),
            ascii: false,
        }
    }
}

impl DrawStyle {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    pub fn with_unlabeled(mut self, label: impl Into<String>) -> Self {
        self.unlabeled = label.into();
        self
    }

    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    fn glyphs(&self) -> Glyphs {
        if self.ascii {
            Glyphs {
                tee: '|',
                corner: '`',
                vertical: '|',
                horizontal: '-',
            }
        } else {
            Glyphs {
                tee: '├',
                corner: '└',
                vertical: '│',
                horizontal: '─',
            }
        }
    }
}

struct Glyphs {
    tee: char,
    corner: char,
    vertical: char,
    horizontal: char,
}

/// Shape of a queue as a labelled tree
///
/// Skew heaps can be as deep as they are large, so cloning, comparing and
/// dropping a drawing all walk it with an explicit stack.
#[derive(Debug)]
pub enum TreeDrawing {
    /// Placeholder for an empty subtree
    Empty,
    /// A node with its label and children in drawing order
    Node {
        label: String,
        children: Vec<TreeDrawing>,
    },
}

impl TreeDrawing {
    pub fn empty() -> Self {
        TreeDrawing::Empty
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        TreeDrawing::node(label, Vec::new())
    }

    pub fn node(label: impl Into<String>, children: Vec<TreeDrawing>) -> Self {
        TreeDrawing::Node {
            label: label.into(),
            children,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TreeDrawing::Empty)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            TreeDrawing::Empty => None,
            TreeDrawing::Node { label, .. } => Some(label),
        }
    }

    pub fn children(&self) -> &[TreeDrawing] {
        match self {
            TreeDrawing::Empty => &[],
            TreeDrawing::Node { children, .. } => children,
        }
    }

    /// Number of labelled nodes, placeholders excluded
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(drawing) = stack.pop() {
            if let TreeDrawing::Node { children, .. } = drawing {
                count += 1;
                stack.extend(children);
            }
        }
        count
    }

    /// Renders with [`DrawStyle::default`]
    pub fn render(&self) -> String {
        self.render_with(&DrawStyle::default())
    }

    /// Renders the drawing as an indented outline, one node per line
    ///
    /// ```rust
    /// use persistent_heaps::drawing::{DrawStyle, TreeDrawing};
    ///
    /// let d = TreeDrawing::node("8", vec![TreeDrawing::leaf("5"), TreeDrawing::leaf("1")]);
    /// assert_eq!(d.render(), "8\n├── 5\n└── 1\n");
    /// assert_eq!(
    ///     d.render_with(&DrawStyle::default().with_ascii(true).with_indent(1)),
    ///     "8\n|- 5\n`- 1\n"
    /// );
    /// ```
    pub fn render_with(&self, style: &DrawStyle) -> String {
        let glyphs = style.glyphs();
        let mut out = String::new();
        out.push_str(self.display_label(style));
        out.push('\n');
        self.render_children(&mut out, style, &glyphs);
        out
    }

    fn display_label<'a>(&'a self, style: &'a DrawStyle) -> &'a str {
        match self {
            TreeDrawing::Empty => &style.empty_label,
            TreeDrawing::Node { label, .. } if label.is_empty() => &style.unlabeled,
            TreeDrawing::Node { label, .. } => label,
        }
    }

    fn render_children(&self, out: &mut String, style: &DrawStyle, glyphs: &Glyphs) {
        let mut pending: Vec<(&TreeDrawing, String, bool)> = Vec::new();
        Self::push_children(&mut pending, self, String::new());
        while let Some((drawing, prefix, last)) = pending.pop() {
            out.push_str(&prefix);
            out.push(if last { glyphs.corner } else { glyphs.tee });
            out.extend(std::iter::repeat(glyphs.horizontal).take(style.indent));
            out.push(' ');
            out.push_str(drawing.display_label(style));
            out.push('\n');

            let mut child_prefix = prefix;
            child_prefix.push(if last { ' ' } else { glyphs.vertical });
            child_prefix.extend(std::iter::repeat(' ').take(style.indent + 1));
            Self::push_children(&mut pending, drawing, child_prefix);
        }
    }

    // Pushed in reverse so the first child is rendered first.
    fn push_children<'a>(
        pending: &mut Vec<(&'a TreeDrawing, String, bool)>,
        parent: &'a TreeDrawing,
        prefix: String,
    ) {
        let children = parent.children();
        for (i, child) in children.iter().enumerate().rev() {
            pending.push((child, prefix.clone(), i + 1 == children.len()));
        }
    }
}

impl Clone for TreeDrawing {
    fn clone(&self) -> Self {
        let mut preorder = Vec::new();
        let mut stack = vec![self];
        while let Some(drawing) = stack.pop() {
            preorder.push(drawing);
            stack.extend(drawing.children().iter().rev());
        }

        // Walking the preorder backwards finishes every child before its
        // parent; a parent's copies sit on top of `built` last child first.
        let mut built: Vec<TreeDrawing> = Vec::with_capacity(preorder.len());
        for drawing in preorder.into_iter().rev() {
            let copy = match drawing {
                TreeDrawing::Empty => TreeDrawing::Empty,
                TreeDrawing::Node { label, children } => {
                    let mut copies = built.split_off(built.len() - children.len());
                    copies.reverse();
                    TreeDrawing::node(label.clone(), copies)
                }
            };
            built.push(copy);
        }
        built.pop().unwrap_or(TreeDrawing::Empty)
    }
}

impl PartialEq for TreeDrawing {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (TreeDrawing::Empty, TreeDrawing::Empty) => {}
                (
                    TreeDrawing::Node {
                        label: a_label,
                        children: a_children,
                    },
                    TreeDrawing::Node {
                        label: b_label,
                        children: b_children,
                    },
                ) => {
                    if a_label != b_label || a_children.len() != b_children.len() {
                        return false;
                    }
                    pending.extend(a_children.iter().zip(b_children));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for TreeDrawing {}

impl Drop for TreeDrawing {
    fn drop(&mut self) {
        let mut stack = match self {
            TreeDrawing::Node { children, .. } => std::mem::take(children),
            TreeDrawing::Empty => return,
        };
        while let Some(mut drawing) = stack.pop() {
            if let TreeDrawing::Node { children, .. } = &mut drawing {
                stack.append(children);
            }
        }
    }
}

impl fmt::Display for TreeDrawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
