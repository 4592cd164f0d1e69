//! Element categories used by tree construction.

use sedge_dom::Namespace;

use crate::tree_handler::Element;

/// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules"
const SPECIAL_HTML: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound",
    "blockquote", "body", "br", "button", "caption", "center", "col", "colgroup", "dd",
    "details", "dir", "div", "dl", "dt", "embed", "fieldset", "figcaption", "figure", "footer",
    "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header", "hgroup",
    "hr", "html", "iframe", "img", "input", "keygen", "li", "link", "listing", "main",
    "marquee", "menu", "meta", "nav", "noembed", "noframes", "noscript", "object", "ol", "p",
    "param", "plaintext", "pre", "script", "search", "section", "select", "source", "style",
    "summary", "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "title",
    "tr", "track", "ul", "wbr", "xmp",
];

/// "a, b, big, code, em, font, i, nobr, s, small, strike, strong, tt, and u"
pub(super) const FORMATTING_ELEMENTS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt",
    "u",
];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
///
/// "a dd element, a dt element, an li element, an optgroup element, an option
/// element, a p element, an rb element, an rp element, an rt element, or an
/// rtc element"
pub(super) const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// "generate all implied end tags thoroughly" adds these.
pub(super) const THOROUGH_IMPLIED_END_TAGS: &[&str] = &[
    "caption", "colgroup", "tbody", "td", "tfoot", "th", "thead", "tr",
];

pub(super) const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// True for elements in the special category, including the MathML and SVG
/// ones.
pub(super) fn is_special(element: &Element) -> bool {
    match element.namespace {
        Namespace::Html => SPECIAL_HTML.contains(&element.name.as_str()),
        Namespace::MathMl => matches!(
            element.name.as_str(),
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(element.name.as_str(), "foreignObject" | "desc" | "title"),
    }
}

/// The kinds of "has an element in ... scope".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    Select,
}

impl Scope {
    /// True if `element` stops the scope walk.
    pub(super) fn is_boundary(self, element: &Element) -> bool {
        match self {
            Self::Default => is_default_scope_boundary(element),
            Self::ListItem => {
                is_default_scope_boundary(element) || element.is_html_one_of(&["ol", "ul"])
            }
            Self::Button => is_default_scope_boundary(element) || element.is_html("button"),
            Self::Table => element.is_html_one_of(&["html", "table", "template"]),
            // "all element types except the following: optgroup in the HTML
            // namespace, option in the HTML namespace"
            Self::Select => !element.is_html_one_of(&["optgroup", "option"]),
        }
    }
}

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// "applet, caption, html, table, td, th, marquee, object, template, MathML
/// mi, MathML mo, MathML mn, MathML ms, MathML mtext, MathML annotation-xml,
/// SVG foreignObject, SVG desc, SVG title"
fn is_default_scope_boundary(element: &Element) -> bool {
    match element.namespace {
        Namespace::Html => matches!(
            element.name.as_str(),
            "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                | "template"
        ),
        Namespace::MathMl => matches!(
            element.name.as_str(),
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Namespace::Svg => matches!(element.name.as_str(), "foreignObject" | "desc" | "title"),
    }
}
