//! Per-format text transforms used while rendering templates.
//!
//! Each template-driven format provides one [`FormatFunctions`] implementation.
//! The functions are exposed to templates as handlebars helpers, see
//! [`register_helpers`].

pub mod man;
pub mod markdown;
pub mod rest;

use crate::doc::Flag;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde_json::Value as Json;
use std::sync::Arc;

pub use man::ManFunctions;
pub use markdown::MarkdownFunctions;
pub use rest::RestFunctions;

/// The text transforms a template may call for one output format.
///
/// All operations are pure; none perform I/O.
pub trait FormatFunctions: Send + Sync {
    fn format_header(&self, input: &str) -> String;
    fn format_text(&self, input: &str) -> String;
    /// Formats a block of flag usage lines.
    fn format_options(&self, input: &str) -> String;
    fn format_flag(&self, input: &Flag) -> String;
    /// Computes the link target for a related command's full path.
    fn see_also_path(&self, input: &str) -> String;
    fn format_example(&self, input: &str) -> String;
    fn format_auto_gen_tag(&self, input: &str) -> String;

    /// A flag is local when it is neither persistent nor inherited.
    fn is_local_flag(&self, input: &Flag) -> bool {
        !input.persistent && !input.inherited
    }
}

#[derive(Clone, Copy)]
enum HelperKind {
    Header,
    Text,
    Options,
    Flag,
    SeeAlsoPath,
    Example,
    AutoGen,
    IsLocal,
}

/// Helper names available to templates, paired with the function they call.
const HELPERS: [(&str, HelperKind); 8] = [
    ("header", HelperKind::Header),
    ("text", HelperKind::Text),
    ("options", HelperKind::Options),
    ("flag", HelperKind::Flag),
    ("see_also_path", HelperKind::SeeAlsoPath),
    ("example", HelperKind::Example),
    ("autogen", HelperKind::AutoGen),
    ("is_local", HelperKind::IsLocal),
];

/// Binds one [`FormatFunctions`] operation to a handlebars helper.
struct FormatHelper {
    kind: HelperKind,
    funcs: Arc<dyn FormatFunctions>,
}

impl FormatHelper {
    fn apply(&self, value: &Json) -> Result<Json, RenderError> {
        let result = match self.kind {
            HelperKind::Flag | HelperKind::IsLocal => {
                let flag: Flag = serde_json::from_value(value.clone()).map_err(|e| {
                    RenderErrorReason::Other(format!("expected a flag argument: {e}"))
                })?;
                if let HelperKind::IsLocal = self.kind {
                    return Ok(Json::Bool(self.funcs.is_local_flag(&flag)));
                }
                self.funcs.format_flag(&flag)
            }
            kind => {
                let text = match value {
                    Json::String(s) => s.clone(),
                    Json::Null => String::new(),
                    other => other.to_string(),
                };
                match kind {
                    HelperKind::Header => self.funcs.format_header(&text),
                    HelperKind::Text => self.funcs.format_text(&text),
                    HelperKind::Options => self.funcs.format_options(&text),
                    HelperKind::SeeAlsoPath => self.funcs.see_also_path(&text),
                    HelperKind::Example => self.funcs.format_example(&text),
                    _ => self.funcs.format_auto_gen_tag(&text),
                }
            }
        };
        Ok(Json::String(result))
    }
}

impl HelperDef for FormatHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("format helper", 0))?;
        self.apply(param.value()).map(ScopedJson::Derived)
    }
}

/// Registers every format function of `funcs` as a helper on `registry`.
pub fn register_helpers(registry: &mut Handlebars<'_>, funcs: Arc<dyn FormatFunctions>) {
    for (name, kind) in HELPERS {
        registry.register_helper(
            name,
            Box::new(FormatHelper {
                kind,
                funcs: Arc::clone(&funcs),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NamedFunctions;

    impl FormatFunctions for NamedFunctions {
        fn format_header(&self, _: &str) -> String {
            "FormatHeader".to_string()
        }
        fn format_text(&self, _: &str) -> String {
            "FormatText".to_string()
        }
        fn format_options(&self, _: &str) -> String {
            "FormatOptions".to_string()
        }
        fn format_flag(&self, _: &Flag) -> String {
            "FormatFlag".to_string()
        }
        fn see_also_path(&self, _: &str) -> String {
            "SeeAlsoPath".to_string()
        }
        fn format_example(&self, _: &str) -> String {
            "FormatExample".to_string()
        }
        fn format_auto_gen_tag(&self, _: &str) -> String {
            "FormatAutoGenTag".to_string()
        }
    }

    fn registry() -> Handlebars<'static> {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        register_helpers(&mut hb, Arc::new(NamedFunctions));
        hb
    }

    #[test]
    fn test_helpers_bind_expected_functions() {
        let hb = registry();
        let data = json!({ "value": "x", "flag": { "name": "f" } });
        let cases = [
            ("{{header value}}", "FormatHeader"),
            ("{{text value}}", "FormatText"),
            ("{{options value}}", "FormatOptions"),
            ("{{flag flag}}", "FormatFlag"),
            ("{{see_also_path value}}", "SeeAlsoPath"),
            ("{{example value}}", "FormatExample"),
            ("{{autogen value}}", "FormatAutoGenTag"),
        ];
        for (template, expected) in cases {
            assert_eq!(hb.render_template(template, &data).unwrap(), expected, "{template}");
        }
    }

    #[test]
    fn test_is_local_helper() {
        let hb = registry();
        let template = "{{#if (is_local flag)}}local{{else}}shared{{/if}}";
        let cases = [
            (false, false, "local"),
            (true, false, "shared"),
            (false, true, "shared"),
            (true, true, "shared"),
        ];
        for (persistent, inherited, expected) in cases {
            let data = json!({ "flag": { "name": "f", "persistent": persistent, "inherited": inherited } });
            assert_eq!(hb.render_template(template, &data).unwrap(), expected);
        }
    }

    #[test]
    fn test_helper_without_argument_fails() {
        let hb = registry();
        assert!(hb.render_template("{{header}}", &json!({})).is_err());
    }

    #[test]
    fn test_default_is_local_flag() {
        let funcs = NamedFunctions;
        let mut flag = Flag::default();
        assert!(funcs.is_local_flag(&flag));
        flag.persistent = true;
        assert!(!funcs.is_local_flag(&flag));
        flag.inherited = true;
        assert!(!funcs.is_local_flag(&flag));
        flag.persistent = false;
        assert!(!funcs.is_local_flag(&flag));
    }
}
