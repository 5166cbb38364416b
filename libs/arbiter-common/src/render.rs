//! Value Rendering
//!
//! Compact structural text for candidate outputs and input descriptions:
//! integers and booleans bare, text quoted, sequences as `[a,b,c]` with no spaces.

/// Escape only `"` and `\`; every other character passes through unchanged
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub trait Render {
    fn render(&self) -> String;
}

macro_rules! render_display {
    ($($ty:ty),*) => {
        $(impl Render for $ty {
            fn render(&self) -> String {
                self.to_string()
            }
        })*
    };
}

render_display!(i32, i64, u32, u64, usize, bool);

impl Render for String {
    fn render(&self) -> String {
        format!("\"{}\"", escape(self))
    }
}

impl Render for &str {
    fn render(&self) -> String {
        format!("\"{}\"", escape(self))
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self) -> String {
        let parts: Vec<String> = self.iter().map(Render::render).collect();
        format!("[{}]", parts.join(","))
    }
}

/// Human-readable echo of a candidate's arguments: `[arg1, arg2, ...]`
pub fn describe_args(args: &[&dyn Render]) -> String {
    let parts: Vec<String> = args.iter().map(|arg| arg.render()).collect();
    format!("[{}]", parts.join(", "))
}
