/*!
Generic indentation-driven tree builder.

Builds a nested [ValueMap] from a block of `key[: value]` lines using nothing but relative
indentation, for blocks whose fields are not known up front:

```text
BGP state:          Established
  Neighbor address: 10.100.0.122
  Neighbor AS:      65002
Channel ipv4
  State:          UP
```

Siblings at the same width land in the same map. A deeper line turns the previous sibling into
a map holding the deeper lines (see [Promotion] for what happens to its own value), and a
shallower line closes maps until its width is found again.
*/
use crate::error::ParserError;
use crate::models::{Value, ValueMap};
use crate::parser::reader::{Line, LineReader};
use log::trace;
use std::io::BufRead;

/// What happens to a key's own value when indented lines below it turn it into a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Promotion {
    /// The value is dropped: `a: 1` followed by `  b: 2` gives `{a: {b: 2}}`.
    #[default]
    Replace,
    /// A non-null value is kept inside the new map under the same key:
    /// `a: 1` followed by `  b: 2` gives `{a: {a: 1, b: 2}}`.
    Preserve,
}

/// One open map on the builder stack.
struct Frame {
    indent: usize,
    /// Key under which the map is stored in the parent frame; `None` for the root.
    key: Option<String>,
    map: ValueMap,
    last_key: Option<String>,
}

impl Frame {
    fn new(indent: usize, key: Option<String>, map: ValueMap) -> Self {
        Frame {
            indent,
            key,
            map,
            last_key: None,
        }
    }

    fn insert_line(&mut self, text: &str) {
        let (key, value) = match text.split_once(':') {
            Some((key, value)) => (key.trim().to_string(), Value::from_scalar(value)),
            None => (text.trim().to_string(), Value::Null),
        };
        self.map.insert(key.clone(), value);
        self.last_key = Some(key);
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    promotion: Promotion,
    parent_indent: Option<usize>,
}

impl TreeBuilder {
    pub fn new() -> TreeBuilder {
        TreeBuilder::default()
    }

    pub fn promotion(self, promotion: Promotion) -> TreeBuilder {
        TreeBuilder { promotion, ..self }
    }

    /// Treat the block as the children of a line printed at `indent`: lines indented no deeper
    /// than that end the block and are pushed back.
    pub fn parent_indent(self, indent: usize) -> TreeBuilder {
        TreeBuilder {
            parent_indent: Some(indent),
            ..self
        }
    }

    /// Read one block.
    ///
    /// The block ends at end of input, at a blank line (consumed) or at a line that is not
    /// deeper than the parent indent (pushed back). The first line fixes the width of the
    /// root map.
    pub fn build<R: BufRead>(&self, reader: &mut LineReader<R>) -> Result<ValueMap, ParserError> {
        let mut stack: Vec<Frame> = vec![Frame::new(0, None, ValueMap::new())];
        let mut first = true;

        while let Some(line) = reader.read_line()? {
            if line.is_blank() {
                break;
            }
            let indent = line.indent();
            if self.parent_indent.is_some_and(|parent| indent <= parent) {
                reader.rewind_line()?;
                break;
            }
            if first {
                stack[0].indent = indent;
                first = false;
            }
            trace!("indent {} line {:?}", indent, line.text);

            if indent < stack[0].indent {
                return Err(inconsistent(&line));
            }
            let mut popped = false;
            while stack.len() > 1 && indent < stack[stack.len() - 1].indent {
                close_frame(&mut stack);
                popped = true;
            }

            let top = stack.len() - 1;
            if indent == stack[top].indent {
                stack[top].insert_line(line.as_str().trim());
                continue;
            }
            // deeper than the innermost open map
            if popped {
                return Err(inconsistent(&line));
            }
            let key = match stack[top].last_key.clone() {
                Some(key) => key,
                None => return Err(inconsistent(&line)),
            };
            let prior = stack[top]
                .map
                .get_mut(&key)
                .map(|v| std::mem::replace(v, Value::Null))
                .unwrap_or(Value::Null);
            let mut map = ValueMap::new();
            match prior {
                Value::Map(existing) => map = existing,
                Value::Null => {}
                scalar => {
                    if self.promotion == Promotion::Preserve {
                        map.insert(key.clone(), scalar);
                    }
                }
            }
            let mut frame = Frame::new(indent, Some(key), map);
            frame.insert_line(line.as_str().trim());
            stack.push(frame);
        }

        while stack.len() > 1 {
            close_frame(&mut stack);
        }
        Ok(stack.pop().map(|root| root.map).unwrap_or_default())
    }
}

/// Pop the innermost frame and store its map in the parent, replacing the promoted entry.
fn close_frame(stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        if let (Some(parent), Some(key)) = (stack.last_mut(), frame.key) {
            parent.map.insert(key, Value::Map(frame.map));
        }
    }
}

fn inconsistent(line: &Line) -> ParserError {
    ParserError::IndentInconsistency {
        line_no: line.number,
        line: line.text.clone(),
    }
}
