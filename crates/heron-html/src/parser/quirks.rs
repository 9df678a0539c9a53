//! DOCTYPE-driven document modes.
//!
//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)

use heron_dom::QuirksMode;

/// "The public identifier starts with: ..." (lowercase, compared ASCII
/// case-insensitively).
const QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// "The public identifier is set to: ..."
const QUIRKY_PUBLIC_IDS: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

/// "The system identifier is set to: ..."
const QUIRKY_SYSTEM_IDS: &[&str] = &["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

/// HTML 4.01 frameset/transitional: quirks without a system identifier,
/// limited quirks with one.
const HTML4_TRANSITIONAL_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

const LIMITED_QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

fn starts_with_any(id: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| {
        id.len() >= prefix.len() && id.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}

fn equals_any(id: &str, candidates: &[&str]) -> bool {
    candidates.iter().any(|candidate| id.eq_ignore_ascii_case(candidate))
}

/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
#[must_use]
pub fn doctype_is_parse_error(name: Option<&str>, public_id: Option<&str>, system_id: Option<&str>) -> bool {
    name != Some("html") || public_id.is_some() || system_id.is_some_and(|id| id != "about:legacy-compat")
}

/// The document mode a DOCTYPE token selects.
///
/// # Example
///
/// ```
/// use heron_dom::QuirksMode;
/// use heron_html::parser::quirks::quirks_mode_for_doctype;
///
/// assert_eq!(quirks_mode_for_doctype(Some("html"), None, None, false, false), QuirksMode::NoQuirks);
/// assert_eq!(
///     quirks_mode_for_doctype(Some("html"), Some("-//W3C//DTD HTML 4.01 Transitional//EN"), None, false, false),
///     QuirksMode::Quirks,
/// );
/// ```
#[must_use]
pub fn quirks_mode_for_doctype(
    name: Option<&str>,
    public_id: Option<&str>,
    system_id: Option<&str>,
    force_quirks: bool,
    iframe_srcdoc: bool,
) -> QuirksMode {
    // "If the document is not an iframe srcdoc document, and the parser
    // cannot change the mode flag is false, and the DOCTYPE token matches one
    // of the conditions in the following list, then set the Document to
    // quirks mode"
    if iframe_srcdoc {
        return QuirksMode::NoQuirks;
    }
    if force_quirks || name != Some("html") {
        return QuirksMode::Quirks;
    }

    let public = public_id.unwrap_or("");
    if public_id.is_some() && equals_any(public, QUIRKY_PUBLIC_IDS) {
        return QuirksMode::Quirks;
    }
    if system_id.is_some_and(|id| equals_any(id, QUIRKY_SYSTEM_IDS)) {
        return QuirksMode::Quirks;
    }
    if public_id.is_some() {
        if starts_with_any(public, QUIRKY_PUBLIC_PREFIXES) {
            return QuirksMode::Quirks;
        }
        // "The system identifier is missing and the public identifier starts with: ..."
        if system_id.is_none() && starts_with_any(public, HTML4_TRANSITIONAL_PREFIXES) {
            return QuirksMode::Quirks;
        }
        if starts_with_any(public, LIMITED_QUIRKY_PUBLIC_PREFIXES) {
            return QuirksMode::LimitedQuirks;
        }
        // "The system identifier is not missing and the public identifier
        // starts with: ..."
        if system_id.is_some() && starts_with_any(public, HTML4_TRANSITIONAL_PREFIXES) {
            return QuirksMode::LimitedQuirks;
        }
    }
    QuirksMode::NoQuirks
}
