use super::{CommandEntry, CommandGroup, FormatAction, Glyph};

const fn wrap(open: &'static str, close: &'static str) -> FormatAction {
    FormatAction::Wrap { open, close }
}

const fn plain(
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    action: FormatAction,
) -> CommandEntry {
    CommandEntry::new(CommandGroup::Plain, id, label, Glyph::Icon(icon), action)
}

const fn html(id: &'static str, label: &'static str, tag: &'static str) -> CommandEntry {
    CommandEntry::new(
        CommandGroup::Html,
        id,
        label,
        Glyph::Badge("HTML"),
        FormatAction::HtmlTag(tag),
    )
}

const fn lower(
    id: &'static str,
    label: &'static str,
    letter: &'static str,
    command: &'static str,
) -> CommandEntry {
    CommandEntry::new(
        CommandGroup::GreekLower,
        id,
        label,
        Glyph::Letter(letter),
        FormatAction::MathSymbol(command),
    )
}

const fn upper(
    id: &'static str,
    label: &'static str,
    letter: &'static str,
    command: &'static str,
) -> CommandEntry {
    CommandEntry::new(
        CommandGroup::GreekUpper,
        id,
        label,
        Glyph::Letter(letter),
        FormatAction::MathSymbol(command),
    )
}

const fn symbol(
    id: &'static str,
    label: &'static str,
    preview: &'static str,
    command: &'static str,
) -> CommandEntry {
    CommandEntry::new(
        CommandGroup::Latex,
        id,
        label,
        Glyph::Preview(preview),
        FormatAction::MathSymbol(command),
    )
}

const fn snippet(
    id: &'static str,
    label: &'static str,
    preview: &'static str,
    snippet: &'static str,
    cursor: usize,
) -> CommandEntry {
    CommandEntry::new(
        CommandGroup::Latex,
        id,
        label,
        Glyph::Preview(preview),
        FormatAction::MathSnippet { snippet, cursor },
    )
}

pub(super) static PLAIN: &[CommandEntry] = &[
    plain("plain.bold", "bold", "B", wrap("**", "**")),
    plain("plain.italic", "italic", "I", wrap("*", "*")),
    plain("plain.strikethrough", "strikethrough", "S", wrap("~~", "~~")),
    plain("plain.highlight", "highlight", "H", wrap("==", "==")),
    plain("plain.code", "inline code", "`", wrap("`", "`")),
    plain("plain.link", "link", "@", wrap("[", "]()")),
    plain("plain.comment", "comment", "%", wrap("%%", "%%")),
    plain("plain.heading-1", "heading 1", "1", FormatAction::LinePrefix("# ")),
    plain("plain.heading-2", "heading 2", "2", FormatAction::LinePrefix("## ")),
    plain("plain.heading-3", "heading 3", "3", FormatAction::LinePrefix("### ")),
    plain("plain.quote", "quote", ">", FormatAction::LinePrefix("> ")),
    plain("plain.task", "task", "☐", FormatAction::LinePrefix("- [ ] ")),
    plain("plain.bullet", "bullet", "•", FormatAction::LinePrefix("- ")),
];

pub(super) static HTML: &[CommandEntry] = &[
    html("html.underline", "underline", "u"),
    html("html.superscript", "superscript", "sup"),
    html("html.subscript", "subscript", "sub"),
    html("html.mark", "mark", "mark"),
    html("html.keyboard", "keyboard", "kbd"),
    html("html.small", "small", "small"),
    html("html.center", "center", "center"),
    html("html.inserted", "inserted", "ins"),
    html("html.deleted", "deleted", "del"),
    html("html.abbreviation", "abbreviation", "abbr"),
    html("html.quotation", "quotation", "q"),
    html("html.citation", "citation", "cite"),
];

pub(super) static GREEK_LOWER: &[CommandEntry] = &[
    lower("greek-lowercase.alpha", "alpha", "α", "\\alpha"),
    lower("greek-lowercase.beta", "beta", "β", "\\beta"),
    lower("greek-lowercase.gamma", "gamma", "γ", "\\gamma"),
    lower("greek-lowercase.delta", "delta", "δ", "\\delta"),
    lower("greek-lowercase.epsilon", "epsilon", "ε", "\\epsilon"),
    lower("greek-lowercase.zeta", "zeta", "ζ", "\\zeta"),
    lower("greek-lowercase.eta", "eta", "η", "\\eta"),
    lower("greek-lowercase.theta", "theta", "θ", "\\theta"),
    lower("greek-lowercase.iota", "iota", "ι", "\\iota"),
    lower("greek-lowercase.kappa", "kappa", "κ", "\\kappa"),
    lower("greek-lowercase.lambda", "lambda", "λ", "\\lambda"),
    lower("greek-lowercase.mu", "mu", "μ", "\\mu"),
    lower("greek-lowercase.nu", "nu", "ν", "\\nu"),
    lower("greek-lowercase.xi", "xi", "ξ", "\\xi"),
    lower("greek-lowercase.omicron", "omicron", "ο", "o"),
    lower("greek-lowercase.pi", "pi", "π", "\\pi"),
    lower("greek-lowercase.rho", "rho", "ρ", "\\rho"),
    lower("greek-lowercase.sigma", "sigma", "σ", "\\sigma"),
    lower("greek-lowercase.tau", "tau", "τ", "\\tau"),
    lower("greek-lowercase.upsilon", "upsilon", "υ", "\\upsilon"),
    lower("greek-lowercase.phi", "phi", "φ", "\\phi"),
    lower("greek-lowercase.chi", "chi", "χ", "\\chi"),
    lower("greek-lowercase.psi", "psi", "ψ", "\\psi"),
    lower("greek-lowercase.omega", "omega", "ω", "\\omega"),
];

// LaTeX has no commands for capitals that look like Latin letters.
pub(super) static GREEK_UPPER: &[CommandEntry] = &[
    upper("greek-uppercase.alpha", "Alpha", "Α", "\\mathrm{A}"),
    upper("greek-uppercase.beta", "Beta", "Β", "\\mathrm{B}"),
    upper("greek-uppercase.gamma", "Gamma", "Γ", "\\Gamma"),
    upper("greek-uppercase.delta", "Delta", "Δ", "\\Delta"),
    upper("greek-uppercase.epsilon", "Epsilon", "Ε", "\\mathrm{E}"),
    upper("greek-uppercase.zeta", "Zeta", "Ζ", "\\mathrm{Z}"),
    upper("greek-uppercase.eta", "Eta", "Η", "\\mathrm{H}"),
    upper("greek-uppercase.theta", "Theta", "Θ", "\\Theta"),
    upper("greek-uppercase.iota", "Iota", "Ι", "\\mathrm{I}"),
    upper("greek-uppercase.kappa", "Kappa", "Κ", "\\mathrm{K}"),
    upper("greek-uppercase.lambda", "Lambda", "Λ", "\\Lambda"),
    upper("greek-uppercase.mu", "Mu", "Μ", "\\mathrm{M}"),
    upper("greek-uppercase.nu", "Nu", "Ν", "\\mathrm{N}"),
    upper("greek-uppercase.xi", "Xi", "Ξ", "\\Xi"),
    upper("greek-uppercase.omicron", "Omicron", "Ο", "\\mathrm{O}"),
    upper("greek-uppercase.pi", "Pi", "Π", "\\Pi"),
    upper("greek-uppercase.rho", "Rho", "Ρ", "\\mathrm{P}"),
    upper("greek-uppercase.sigma", "Sigma", "Σ", "\\Sigma"),
    upper("greek-uppercase.tau", "Tau", "Τ", "\\mathrm{T}"),
    upper("greek-uppercase.upsilon", "Upsilon", "Υ", "\\Upsilon"),
    upper("greek-uppercase.phi", "Phi", "Φ", "\\Phi"),
    upper("greek-uppercase.chi", "Chi", "Χ", "\\mathrm{X}"),
    upper("greek-uppercase.psi", "Psi", "Ψ", "\\Psi"),
    upper("greek-uppercase.omega", "Omega", "Ω", "\\Omega"),
];

pub(super) static LATEX: &[CommandEntry] = &[
    snippet("latex.fraction", "fraction", "a/b", "\\frac{}{}", 6),
    snippet("latex.sqrt", "square root", "√x", "\\sqrt{}", 6),
    snippet("latex.nth-root", "nth root", "ⁿ√x", "\\sqrt[]{}", 6),
    snippet("latex.sum", "sum", "∑", "\\sum_{}^{}", 6),
    snippet("latex.product", "product", "∏", "\\prod_{}^{}", 7),
    snippet("latex.integral", "integral", "∫", "\\int_{}^{}", 6),
    snippet("latex.limit", "limit", "lim", "\\lim_{}", 6),
    snippet("latex.vector", "vector", "v⃗", "\\vec{}", 5),
    snippet("latex.hat", "hat", "x̂", "\\hat{}", 5),
    snippet("latex.overline", "overline", "x̄", "\\overline{}", 10),
    snippet("latex.binomial", "binomial", "(n k)", "\\binom{}{}", 7),
    snippet(
        "latex.matrix",
        "matrix",
        "[::]",
        "\\begin{pmatrix}  \\end{pmatrix}",
        16,
    ),
    snippet("latex.cases", "cases", "{:", "\\begin{cases}  \\end{cases}", 14),
    symbol("latex.infinity", "infinity", "∞", "\\infty"),
    symbol("latex.partial", "partial", "∂", "\\partial"),
    symbol("latex.nabla", "nabla", "∇", "\\nabla"),
    symbol("latex.approx", "approx", "≈", "\\approx"),
    symbol("latex.not-equal", "not equal", "≠", "\\neq"),
    symbol("latex.less-equal", "less or equal", "≤", "\\leq"),
    symbol("latex.greater-equal", "greater or equal", "≥", "\\geq"),
    symbol("latex.right-arrow", "right arrow", "→", "\\rightarrow"),
    symbol("latex.implies", "implies", "⇒", "\\Rightarrow"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_cursors_land_inside_first_slot() {
        for entry in LATEX {
            if let FormatAction::MathSnippet { snippet, cursor } = entry.action {
                let before: String = snippet.chars().take(cursor).collect();
                let after: String = snippet.chars().skip(cursor).collect();
                assert!(
                    before.ends_with('{') || before.ends_with('[') || before.ends_with(' '),
                    "{}: {before}",
                    entry.id
                );
                assert!(!after.is_empty(), "{}", entry.id);
            }
        }
    }

    #[test]
    fn greek_groups_differ_in_case() {
        for (small, capital) in GREEK_LOWER.iter().zip(GREEK_UPPER) {
            let mut capitalised = small.label.to_string();
            capitalised[..1].make_ascii_uppercase();
            assert_eq!(capitalised, capital.label);
        }
    }
}
