//! Property and descriptor tables.
//!
//! Table order is canonical serialization order.

use super::DeclarationContext;
use super::values::ValueKind;

const STYLE: u8 = 1 << 0;
const KEYFRAME: u8 = 1 << 1;
const PAGE: u8 = 1 << 2;
const MARGIN: u8 = 1 << 3;
const POSITION_TRY: u8 = 1 << 4;

const ANIMATABLE: u8 = STYLE | KEYFRAME;
const PAGED: u8 = STYLE | KEYFRAME | PAGE | MARGIN;
const INSET: u8 = STYLE | KEYFRAME | POSITION_TRY;
const SIZING: u8 = PAGED | POSITION_TRY;

/// A property and the contexts it is recognized in.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDef {
    pub name: &'static str,
    pub kind: ValueKind,
    contexts: u8,
}

const fn property(name: &'static str, kind: ValueKind, contexts: u8) -> PropertyDef {
    PropertyDef {
        name,
        kind,
        contexts,
    }
}

const ANY: ValueKind = ValueKind::Any;
const COLOR: ValueKind = ValueKind::Color;
const LENGTH: ValueKind = ValueKind::Length(&[]);
const LINE_WIDTH: ValueKind = ValueKind::Length(&["thin", "medium", "thick"]);
const LENGTH_PERCENTAGE: ValueKind = ValueKind::LengthPercentage(&[]);
const AUTO_LENGTH: ValueKind = ValueKind::LengthPercentage(&["auto"]);
const PADDING: ValueKind = ValueKind::NonNegativeLengthPercentage(&[]);
const SIZE: ValueKind = ValueKind::NonNegativeLengthPercentage(&[
    "auto",
    "min-content",
    "max-content",
    "fit-content",
    "stretch",
]);
const MAX_SIZE: ValueKind = ValueKind::NonNegativeLengthPercentage(&[
    "none",
    "min-content",
    "max-content",
    "fit-content",
    "stretch",
]);
const NUMBER: ValueKind = ValueKind::Number(&[]);
const PERCENTAGE: ValueKind = ValueKind::Percentage;
const TIME: ValueKind = ValueKind::Time;
const TIMES: ValueKind = ValueKind::CommaList(&TIME);
const RADIUS: ValueKind = ValueKind::Repeat(&PADDING, 2);
const BORDER_STYLE: ValueKind = ValueKind::Keyword(&[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
]);
const GAP: ValueKind = ValueKind::NonNegativeLengthPercentage(&["normal"]);
const OVERFLOW: ValueKind = ValueKind::Keyword(&["visible", "hidden", "clip", "scroll", "auto"]);
const SELF_ALIGNMENT: ValueKind = ValueKind::Keyword(&[
    "auto",
    "normal",
    "stretch",
    "baseline",
    "center",
    "start",
    "end",
    "self-start",
    "self-end",
    "flex-start",
    "flex-end",
    "anchor-center",
]);
const CONTENT_ALIGNMENT: ValueKind = ValueKind::Keyword(&[
    "normal",
    "center",
    "start",
    "end",
    "flex-start",
    "flex-end",
    "space-between",
    "space-around",
    "space-evenly",
    "stretch",
]);
const ITEM_ALIGNMENT: ValueKind = ValueKind::Keyword(&[
    "normal",
    "stretch",
    "baseline",
    "center",
    "start",
    "end",
    "self-start",
    "self-end",
    "flex-start",
    "flex-end",
]);
const ANIMATION_NAME: ValueKind = ValueKind::Either(
    &ValueKind::Keyword(&["none"]),
    &ValueKind::Either(&ValueKind::CustomIdent(&[]), &ValueKind::String),
);
const LINE_HEIGHT: ValueKind = ValueKind::Either(&NUMBER, &ValueKind::NonNegativeLengthPercentage(&["normal"]));
const OPACITY: ValueKind = ValueKind::Either(&NUMBER, &PERCENTAGE);
const FONT_SIZE: ValueKind = ValueKind::NonNegativeLengthPercentage(&[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "larger", "smaller", "math",
]);
const FONT_WEIGHT: ValueKind = ValueKind::Number(&["normal", "bold", "bolder", "lighter"]);
const FONT_STRETCH: ValueKind = ValueKind::Either(
    &PERCENTAGE,
    &ValueKind::Keyword(&[
        "normal",
        "ultra-condensed",
        "extra-condensed",
        "condensed",
        "semi-condensed",
        "semi-expanded",
        "expanded",
        "extra-expanded",
        "ultra-expanded",
    ]),
);
const VERTICAL_ALIGN: ValueKind = ValueKind::Either(
    &ValueKind::Keyword(&[
        "baseline", "sub", "super", "text-top", "text-bottom", "middle", "top", "bottom",
    ]),
    &LENGTH_PERCENTAGE,
);

/// Properties, in canonical order.
pub const PROPERTIES: &[PropertyDef] = &[
    property("align-content", CONTENT_ALIGNMENT, ANIMATABLE),
    property("align-items", ITEM_ALIGNMENT, ANIMATABLE),
    property("align-self", SELF_ALIGNMENT, INSET),
    property("animation", ANY, STYLE),
    property(
        "animation-composition",
        ValueKind::CommaList(&ValueKind::Keyword(&["replace", "add", "accumulate"])),
        ANIMATABLE,
    ),
    property("animation-delay", TIMES, STYLE),
    property(
        "animation-direction",
        ValueKind::CommaList(&ValueKind::Keyword(&[
            "normal",
            "reverse",
            "alternate",
            "alternate-reverse",
        ])),
        STYLE,
    ),
    property(
        "animation-duration",
        ValueKind::CommaList(&ValueKind::Either(&ValueKind::Keyword(&["auto"]), &TIME)),
        STYLE,
    ),
    property(
        "animation-fill-mode",
        ValueKind::CommaList(&ValueKind::Keyword(&["none", "forwards", "backwards", "both"])),
        STYLE,
    ),
    property(
        "animation-iteration-count",
        ValueKind::CommaList(&ValueKind::Number(&["infinite"])),
        STYLE,
    ),
    property("animation-name", ValueKind::CommaList(&ANIMATION_NAME), STYLE),
    property(
        "animation-play-state",
        ValueKind::CommaList(&ValueKind::Keyword(&["running", "paused"])),
        STYLE,
    ),
    property("animation-timing-function", ANY, ANIMATABLE),
    property("aspect-ratio", ANY, ANIMATABLE),
    property("background", ANY, PAGED),
    property(
        "background-attachment",
        ValueKind::CommaList(&ValueKind::Keyword(&["scroll", "fixed", "local"])),
        PAGED,
    ),
    property(
        "background-clip",
        ValueKind::CommaList(&ValueKind::Keyword(&[
            "border-box",
            "padding-box",
            "content-box",
            "text",
        ])),
        PAGED,
    ),
    property("background-color", COLOR, PAGED),
    property("background-image", ANY, PAGED),
    property(
        "background-origin",
        ValueKind::CommaList(&ValueKind::Keyword(&["border-box", "padding-box", "content-box"])),
        PAGED,
    ),
    property("background-position", ANY, PAGED),
    property("background-repeat", ANY, PAGED),
    property("background-size", ANY, PAGED),
    property("bleed", ValueKind::Length(&["auto"]), PAGE),
    property("block-size", SIZE, INSET),
    property("border", ANY, PAGED),
    property("border-bottom", ANY, PAGED),
    property("border-bottom-color", COLOR, PAGED),
    property("border-bottom-left-radius", RADIUS, PAGED),
    property("border-bottom-right-radius", RADIUS, PAGED),
    property("border-bottom-style", BORDER_STYLE, PAGED),
    property("border-bottom-width", LINE_WIDTH, PAGED),
    property("border-collapse", ValueKind::Keyword(&["collapse", "separate"]), ANIMATABLE),
    property("border-color", ValueKind::Repeat(&COLOR, 4), PAGED),
    property("border-left", ANY, PAGED),
    property("border-left-color", COLOR, PAGED),
    property("border-left-style", BORDER_STYLE, PAGED),
    property("border-left-width", LINE_WIDTH, PAGED),
    property("border-radius", ANY, PAGED),
    property("border-right", ANY, PAGED),
    property("border-right-color", COLOR, PAGED),
    property("border-right-style", BORDER_STYLE, PAGED),
    property("border-right-width", LINE_WIDTH, PAGED),
    property("border-spacing", ValueKind::Repeat(&LENGTH, 2), ANIMATABLE),
    property("border-style", ValueKind::Repeat(&BORDER_STYLE, 4), PAGED),
    property("border-top", ANY, PAGED),
    property("border-top-color", COLOR, PAGED),
    property("border-top-left-radius", RADIUS, PAGED),
    property("border-top-right-radius", RADIUS, PAGED),
    property("border-top-style", BORDER_STYLE, PAGED),
    property("border-top-width", LINE_WIDTH, PAGED),
    property("border-width", ValueKind::Repeat(&LINE_WIDTH, 4), PAGED),
    property("bottom", AUTO_LENGTH, INSET),
    property("box-shadow", ANY, PAGED),
    property("box-sizing", ValueKind::Keyword(&["content-box", "border-box"]), ANIMATABLE),
    property(
        "clear",
        ValueKind::Keyword(&["none", "left", "right", "both", "inline-start", "inline-end"]),
        ANIMATABLE,
    ),
    property("clip-path", ANY, ANIMATABLE),
    property("color", COLOR, PAGED),
    property("column-gap", GAP, ANIMATABLE),
    property("content", ValueKind::Content, STYLE | KEYFRAME | MARGIN),
    property("counter-increment", ANY, PAGED),
    property("counter-reset", ANY, PAGED),
    property("cursor", ANY, ANIMATABLE),
    property("direction", ValueKind::Keyword(&["ltr", "rtl"]), PAGED),
    property(
        "display",
        ValueKind::Keyword(&[
            "none",
            "block",
            "inline",
            "inline-block",
            "flex",
            "inline-flex",
            "grid",
            "inline-grid",
            "flow-root",
            "contents",
            "table",
            "table-row",
            "table-cell",
            "list-item",
        ]),
        ANIMATABLE,
    ),
    property("fill", ANY, ANIMATABLE),
    property("filter", ANY, ANIMATABLE),
    property("flex", ANY, ANIMATABLE),
    property(
        "flex-basis",
        ValueKind::NonNegativeLengthPercentage(&[
            "auto",
            "content",
            "min-content",
            "max-content",
            "fit-content",
        ]),
        ANIMATABLE,
    ),
    property(
        "flex-direction",
        ValueKind::Keyword(&["row", "row-reverse", "column", "column-reverse"]),
        ANIMATABLE,
    ),
    property("flex-grow", NUMBER, ANIMATABLE),
    property("flex-shrink", NUMBER, ANIMATABLE),
    property("flex-wrap", ValueKind::Keyword(&["nowrap", "wrap", "wrap-reverse"]), ANIMATABLE),
    property(
        "float",
        ValueKind::Keyword(&["left", "right", "none", "inline-start", "inline-end"]),
        ANIMATABLE,
    ),
    property("font", ANY, PAGED),
    property("font-family", ValueKind::FamilyList, PAGED),
    property("font-feature-settings", ANY, PAGED),
    property("font-kerning", ValueKind::Keyword(&["auto", "normal", "none"]), PAGED),
    property("font-size", FONT_SIZE, PAGED),
    property("font-stretch", FONT_STRETCH, PAGED),
    property("font-style", ANY, PAGED),
    property("font-variant", ANY, PAGED),
    property("font-variant-alternates", ANY, PAGED),
    property("font-variant-numeric", ANY, PAGED),
    property("font-weight", FONT_WEIGHT, PAGED),
    property("gap", ValueKind::Repeat(&GAP, 2), ANIMATABLE),
    property("grid-area", ANY, ANIMATABLE),
    property("grid-column", ANY, ANIMATABLE),
    property("grid-row", ANY, ANIMATABLE),
    property("grid-template-areas", ANY, ANIMATABLE),
    property("grid-template-columns", ANY, ANIMATABLE),
    property("grid-template-rows", ANY, ANIMATABLE),
    property("height", SIZE, SIZING),
    property("inline-size", SIZE, INSET),
    property("inset", ValueKind::Repeat(&AUTO_LENGTH, 4), INSET),
    property("inset-block", ValueKind::Repeat(&AUTO_LENGTH, 2), INSET),
    property("inset-block-end", AUTO_LENGTH, INSET),
    property("inset-block-start", AUTO_LENGTH, INSET),
    property("inset-inline", ValueKind::Repeat(&AUTO_LENGTH, 2), INSET),
    property("inset-inline-end", AUTO_LENGTH, INSET),
    property("inset-inline-start", AUTO_LENGTH, INSET),
    property("justify-content", CONTENT_ALIGNMENT, ANIMATABLE),
    property("justify-items", ITEM_ALIGNMENT, ANIMATABLE),
    property("justify-self", SELF_ALIGNMENT, INSET),
    property("left", AUTO_LENGTH, INSET),
    property("letter-spacing", ValueKind::Length(&["normal"]), PAGED),
    property("line-height", LINE_HEIGHT, PAGED),
    property("list-style", ANY, ANIMATABLE),
    property("list-style-type", ANY, ANIMATABLE),
    property("margin", ValueKind::Repeat(&AUTO_LENGTH, 4), SIZING),
    property("margin-block", ValueKind::Repeat(&AUTO_LENGTH, 2), INSET),
    property("margin-bottom", AUTO_LENGTH, SIZING),
    property("margin-inline", ValueKind::Repeat(&AUTO_LENGTH, 2), INSET),
    property("margin-left", AUTO_LENGTH, SIZING),
    property("margin-right", AUTO_LENGTH, SIZING),
    property("margin-top", AUTO_LENGTH, SIZING),
    property("marks", ANY, PAGE),
    property("max-block-size", MAX_SIZE, INSET),
    property("max-height", MAX_SIZE, SIZING),
    property("max-inline-size", MAX_SIZE, INSET),
    property("max-width", MAX_SIZE, SIZING),
    property("min-block-size", SIZE, INSET),
    property("min-height", SIZE, SIZING),
    property("min-inline-size", SIZE, INSET),
    property("min-width", SIZE, SIZING),
    property(
        "object-fit",
        ValueKind::Keyword(&["fill", "contain", "cover", "none", "scale-down"]),
        ANIMATABLE,
    ),
    property("opacity", OPACITY, PAGED),
    property("outline", ANY, PAGED),
    property("outline-color", COLOR, PAGED),
    property("outline-offset", LENGTH, PAGED),
    property("outline-style", ValueKind::Either(&ValueKind::Keyword(&["auto"]), &BORDER_STYLE), PAGED),
    property("outline-width", LINE_WIDTH, PAGED),
    property("overflow", ValueKind::Repeat(&OVERFLOW, 2), ANIMATABLE),
    property("overflow-x", OVERFLOW, ANIMATABLE),
    property("overflow-y", OVERFLOW, ANIMATABLE),
    property("padding", ValueKind::Repeat(&PADDING, 4), PAGED),
    property("padding-block", ValueKind::Repeat(&PADDING, 2), ANIMATABLE),
    property("padding-bottom", PADDING, PAGED),
    property("padding-inline", ValueKind::Repeat(&PADDING, 2), ANIMATABLE),
    property("padding-left", PADDING, PAGED),
    property("padding-right", PADDING, PAGED),
    property("padding-top", PADDING, PAGED),
    property(
        "page",
        ValueKind::Either(&ValueKind::Keyword(&["auto"]), &ValueKind::CustomIdent(&[])),
        STYLE,
    ),
    property(
        "page-orientation",
        ValueKind::Keyword(&["upright", "rotate-left", "rotate-right"]),
        PAGE,
    ),
    property("pointer-events", ANY, ANIMATABLE),
    property(
        "position",
        ValueKind::Keyword(&["static", "relative", "absolute", "fixed", "sticky"]),
        ANIMATABLE,
    ),
    property(
        "position-anchor",
        ValueKind::Either(&ValueKind::Keyword(&["auto"]), &ValueKind::DashedIdent),
        INSET,
    ),
    property("position-area", ANY, INSET),
    property("quotes", ANY, PAGED),
    property("right", AUTO_LENGTH, INSET),
    property("rotate", ANY, ANIMATABLE),
    property("row-gap", GAP, ANIMATABLE),
    property("scale", ANY, ANIMATABLE),
    property("size", ANY, PAGE),
    property("stroke", ANY, ANIMATABLE),
    property("stroke-width", PADDING, ANIMATABLE),
    property(
        "text-align",
        ValueKind::Keyword(&["start", "end", "left", "right", "center", "justify", "match-parent"]),
        PAGED,
    ),
    property("text-decoration", ANY, PAGED),
    property("text-indent", LENGTH_PERCENTAGE, PAGED),
    property("text-overflow", ValueKind::Keyword(&["clip", "ellipsis"]), ANIMATABLE),
    property("text-shadow", ANY, PAGED),
    property(
        "text-transform",
        ValueKind::Keyword(&[
            "none",
            "capitalize",
            "uppercase",
            "lowercase",
            "full-width",
            "full-size-kana",
        ]),
        PAGED,
    ),
    property("top", AUTO_LENGTH, INSET),
    property("transform", ANY, ANIMATABLE),
    property("transform-origin", ANY, ANIMATABLE),
    property("transition", ANY, STYLE),
    property("transition-behavior", ANY, STYLE),
    property("transition-delay", TIMES, STYLE),
    property("transition-duration", TIMES, STYLE),
    property("transition-property", ANY, STYLE),
    property("transition-timing-function", ANY, STYLE),
    property("translate", ANY, ANIMATABLE),
    property(
        "user-select",
        ValueKind::Keyword(&["auto", "text", "none", "contain", "all"]),
        ANIMATABLE,
    ),
    property("vertical-align", VERTICAL_ALIGN, STYLE | KEYFRAME | MARGIN),
    property("visibility", ValueKind::Keyword(&["visible", "hidden", "collapse"]), PAGED),
    property(
        "white-space",
        ValueKind::Keyword(&["normal", "pre", "nowrap", "pre-wrap", "break-spaces", "pre-line"]),
        ANIMATABLE,
    ),
    property("width", SIZE, SIZING),
    property("will-change", ANY, ANIMATABLE),
    property(
        "word-break",
        ValueKind::Keyword(&["normal", "break-all", "keep-all", "break-word"]),
        ANIMATABLE,
    ),
    property("word-spacing", ValueKind::Length(&["normal"]), PAGED),
    property("z-index", ValueKind::Integer(&["auto"]), PAGED),
];

const FONT_FACE: &[(&str, ValueKind)] = &[
    ("font-family", ValueKind::FamilyList),
    ("src", ValueKind::FontSources),
    ("font-style", ANY),
    ("font-weight", ANY),
    ("font-stretch", ANY),
    (
        "font-display",
        ValueKind::Keyword(&["auto", "block", "swap", "fallback", "optional"]),
    ),
    ("unicode-range", ValueKind::UnicodeRange),
    ("font-feature-settings", ANY),
    ("font-variation-settings", ANY),
    ("font-named-instance", ANY),
    ("ascent-override", ANY),
    ("descent-override", ANY),
    ("line-gap-override", ANY),
    ("size-adjust", PERCENTAGE),
];

const FONT_FEATURE_VALUES: &[(&str, ValueKind)] = &[(
    "font-display",
    ValueKind::Keyword(&["auto", "block", "swap", "fallback", "optional"]),
)];

const FONT_PALETTE_VALUES: &[(&str, ValueKind)] = &[
    ("font-family", ValueKind::FamilyList),
    (
        "base-palette",
        ValueKind::Either(&ValueKind::Keyword(&["light", "dark"]), &ValueKind::Integer(&[])),
    ),
    ("override-colors", ANY),
];

const COUNTER_STYLE: &[(&str, ValueKind)] = &[
    ("system", ValueKind::CounterSystem),
    ("symbols", ANY),
    ("additive-symbols", ANY),
    ("negative", ANY),
    ("prefix", ANY),
    ("suffix", ANY),
    ("range", ANY),
    ("pad", ANY),
    (
        "speak-as",
        ValueKind::Either(
            &ValueKind::Keyword(&["auto", "bullets", "numbers", "words", "spell-out"]),
            &ValueKind::CustomIdent(&["none"]),
        ),
    ),
    ("fallback", ValueKind::CustomIdent(&["none"])),
];

const PROPERTY: &[(&str, ValueKind)] = &[
    ("syntax", ValueKind::String),
    ("inherits", ValueKind::Keyword(&["true", "false"])),
    ("initial-value", ANY),
];

const COLOR_PROFILE: &[(&str, ValueKind)] = &[
    ("src", ValueKind::Url),
    (
        "rendering-intent",
        ValueKind::Keyword(&[
            "relative-colorimetric",
            "absolute-colorimetric",
            "perceptual",
            "saturation",
        ]),
    ),
    ("components", ANY),
];

const VIEW_TRANSITION: &[(&str, ValueKind)] = &[
    ("navigation", ValueKind::Keyword(&["auto", "none"])),
    ("types", ANY),
];

fn property_mask(context: DeclarationContext) -> Option<u8> {
    match context {
        DeclarationContext::Style => Some(STYLE),
        DeclarationContext::Keyframe => Some(KEYFRAME),
        DeclarationContext::Page => Some(PAGE),
        DeclarationContext::Margin => Some(MARGIN),
        DeclarationContext::PositionTry => Some(POSITION_TRY),
        _ => None,
    }
}

fn descriptor_table(context: DeclarationContext) -> &'static [(&'static str, ValueKind)] {
    match context {
        DeclarationContext::FontFace => FONT_FACE,
        DeclarationContext::FontFeatureValues => FONT_FEATURE_VALUES,
        DeclarationContext::FontPaletteValues => FONT_PALETTE_VALUES,
        DeclarationContext::CounterStyle => COUNTER_STYLE,
        DeclarationContext::Property => PROPERTY,
        DeclarationContext::ColorProfile => COLOR_PROFILE,
        DeclarationContext::ViewTransition => VIEW_TRANSITION,
        _ => &[],
    }
}

/// The value kind registered for `name` in `context`.
pub fn value_kind(context: DeclarationContext, name: &str) -> Option<&'static ValueKind> {
    match property_mask(context) {
        Some(mask) => PROPERTIES
            .iter()
            .find(|def| def.contexts & mask != 0 && def.name == name)
            .map(|def| &def.kind),
        None => descriptor_table(context)
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, kind)| kind),
    }
}

/// Returns `true` if `name` is recognized in `context`.
pub fn is_recognized(context: DeclarationContext, name: &str) -> bool {
    value_kind(context, name).is_some()
}

/// Canonical position of `name` in `context`.
pub fn canonical_index(context: DeclarationContext, name: &str) -> Option<usize> {
    match property_mask(context) {
        Some(mask) => PROPERTIES
            .iter()
            .filter(|def| def.contexts & mask != 0)
            .position(|def| def.name == name),
        None => descriptor_table(context)
            .iter()
            .position(|(candidate, _)| *candidate == name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_are_sorted_and_unique() {
        for pair in PROPERTIES.windows(2) {
            assert!(pair[0].name < pair[1].name, "{} >= {}", pair[0].name, pair[1].name);
        }
    }

    #[test]
    fn test_context_whitelists() {
        assert!(is_recognized(DeclarationContext::Style, "top"));
        assert!(!is_recognized(DeclarationContext::Page, "top"));
        assert!(is_recognized(DeclarationContext::Page, "font-size"));
        assert!(is_recognized(DeclarationContext::Page, "size"));
        assert!(!is_recognized(DeclarationContext::Style, "size"));
        assert!(is_recognized(DeclarationContext::Margin, "content"));
        assert!(!is_recognized(DeclarationContext::Margin, "top"));
        assert!(!is_recognized(DeclarationContext::Keyframe, "animation-delay"));
        assert!(!is_recognized(DeclarationContext::Keyframe, "animation-duration"));
        assert!(is_recognized(DeclarationContext::Keyframe, "animation-timing-function"));
        assert!(is_recognized(DeclarationContext::PositionTry, "top"));
        assert!(!is_recognized(DeclarationContext::PositionTry, "color"));
        assert!(is_recognized(DeclarationContext::FontFace, "src"));
        assert!(!is_recognized(DeclarationContext::FontFace, "color"));
    }

    #[test]
    fn test_canonical_index() {
        let system = canonical_index(DeclarationContext::CounterStyle, "system");
        let speak_as = canonical_index(DeclarationContext::CounterStyle, "speak-as");
        assert!(system < speak_as);
        assert_eq!(canonical_index(DeclarationContext::Page, "top"), None);
        assert!(
            canonical_index(DeclarationContext::Style, "bottom")
                < canonical_index(DeclarationContext::Style, "top")
        );
    }
}
