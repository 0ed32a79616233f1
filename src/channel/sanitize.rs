//! Terminal control-sequence stripping.

/// Control sequences the RouterOS console embeds in responses: reset,
/// foreground-green, bold, bold-red, erase-to-EOL, foreground-cyan.
///
/// The set is fixed and enumerable; stripping arbitrary ANSI codes is
/// explicitly not a goal, so unrecognized sequences pass through.
const CONTROL_SEQUENCES: [&str; 6] = [
    "\x1b[m",
    "\x1b[32m",
    "\x1b[1m",
    "\x1b[31;1m",
    "\x1b[K",
    "\x1b[36m",
];

/// Strip the known control sequences from captured console text.
///
/// Pure and idempotent: sanitizing already-sanitized text is a no-op.
pub fn sanitize(text: &str) -> String {
    let mut out = text.to_string();
    for seq in CONTROL_SEQUENCES {
        if out.contains(seq) {
            out = out.replace(seq, "");
        }
    }
    out
}
