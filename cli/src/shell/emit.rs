//! Line-oriented shell code emitter.
use super::Shell;

/// Appends POSIX-shell statements to a buffer.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    shell: Shell,
}

#[allow(clippy::unused_self)]
impl Emitter {
    /// Emitter for `shell`.
    #[must_use]
    pub const fn new(shell: Shell) -> Self {
        Self { shell }
    }

    /// Section header comment followed by a blank line.
    pub fn header(&self, out: &mut String, title: &str) {
        self.comment(out, title);
        self.blank(out);
    }

    /// Single `#` comment line.
    pub fn comment(&self, out: &mut String, text: &str) {
        out.push_str("# ");
        out.push_str(text);
        out.push('\n');
    }

    /// Empty line.
    pub fn blank(&self, out: &mut String) {
        out.push('\n');
    }

    /// `export KEY="value"`. Double quotes keep `$VAR` references live.
    pub fn export(&self, out: &mut String, key: &str, value: &str) {
        out.push_str("export ");
        out.push_str(key);
        out.push('=');
        out.push_str(&quote_posix(value));
        out.push('\n');
    }

    /// `source '<path>'`.
    pub fn source(&self, out: &mut String, path: &str) {
        out.push_str("source ");
        out.push_str(&quote_posix_single(path));
        out.push('\n');
    }

    /// Shell function with one statement per body line.
    pub fn function(&self, out: &mut String, name: &str, body: &[String]) {
        out.push_str(name);
        out.push_str("() {\n");
        for line in body {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("}\n");
    }

    /// `eval "$(cmd args…)"` guarded by `command -v cmd`.
    pub fn init_eval_if_exists(&self, out: &mut String, cmd: &str, args: &[String]) {
        out.push_str("if command -v ");
        out.push_str(cmd);
        out.push_str(" >/dev/null 2>&1; then eval \"$(");
        out.push_str(&posix_words(cmd, args));
        out.push_str(")\"; fi\n");
    }

    /// Register `function` to run before every prompt.
    pub fn precmd_hook(&self, out: &mut String, function: &str) {
        match self.shell {
            Shell::Zsh => {
                out.push_str("autoload -Uz add-zsh-hook\n");
                out.push_str("add-zsh-hook precmd ");
                out.push_str(function);
                out.push('\n');
            }
            Shell::Bash => {
                out.push_str("case \";${PROMPT_COMMAND:-};\" in *\";");
                out.push_str(function);
                out.push_str(";\"*) ;; *) PROMPT_COMMAND=\"");
                out.push_str(function);
                out.push_str("${PROMPT_COMMAND:+;$PROMPT_COMMAND}\" ;; esac\n");
            }
        }
    }
}

fn posix_words(cmd: &str, args: &[String]) -> String {
    let mut words = String::from(cmd);
    for arg in args {
        words.push(' ');
        words.push_str(&quote_posix_single(arg));
    }
    words
}

/// Double-quote `s`, escaping the characters that are special inside
/// double quotes except `$`.
#[must_use]
pub fn quote_posix(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' | '"' | '`' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Single-quote `s`; the result is never expanded by the shell.
#[must_use]
pub fn quote_posix_single(s: &str) -> String {
    let mut out = String::from("'");
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}
