//! Console system.
//!
//! Stands in for the live parameter overlay: typed console variables that a
//! frame loop reads every tick, plus registered commands.
//!
//! Provides:
//! - Console variables (cvars) with typed values
//! - Command registration and execution
//! - Command history
//! - Input parsing
//!
//! # Usage
//! ```ignore
//! let mut console = Console::new();
//! console.register_cvar("radius", CvarValue::Float(0.5), "Marker radius", CvarFlags::NONE);
//! console.exec("radius 1.25")?;
//! ```

use std::collections::BTreeMap;

use anyhow::{bail, Context};

use crate::math::Vec3;

/// Console variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum CvarValue {
    Float(f64),
    Vec3(Vec3),
}

impl CvarValue {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CvarValue::Float(v) => Some(*v),
            CvarValue::Vec3(_) => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            CvarValue::Vec3(v) => Some(*v),
            CvarValue::Float(_) => None,
        }
    }

    /// Parses `text` into the same variant as `self`. Non-finite numbers
    /// are rejected.
    fn parse_like(&self, text: &str) -> Option<CvarValue> {
        let text = text.trim();
        match self {
            CvarValue::Float(_) => text
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(CvarValue::Float),
            CvarValue::Vec3(_) => {
                let parts: Vec<f32> = text
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|s| !s.is_empty())
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .ok()?;
                match parts[..] {
                    [x, y, z] if parts.iter().all(|c| c.is_finite()) => {
                        Some(CvarValue::Vec3(Vec3::new(x, y, z)))
                    }
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for CvarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CvarValue::Float(v) => write!(f, "{}", v),
            CvarValue::Vec3(v) => write!(f, "{:.3} {:.3} {:.3}", v.x, v.y, v.z),
        }
    }
}

/// Console variable metadata.
#[derive(Debug, Clone)]
pub struct Cvar {
    pub name: String,
    pub value: CvarValue,
    pub default: CvarValue,
    pub description: String,
    pub flags: CvarFlags,
}

bitflags::bitflags! {
    /// Cvar flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CvarFlags: u32 {
        const NONE = 0;
        const READ_ONLY = 1 << 0;    // Written by the frame loop only
    }
}

impl Default for CvarFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Command handler function type.
pub type CommandHandler = Box<dyn Fn(&[&str], &mut ConsoleContext<'_>) -> anyhow::Result<()>>;

/// Context passed to command handlers.
pub struct ConsoleContext<'a> {
    /// Output buffer for command responses.
    pub output: Vec<String>,
    pub cvars: &'a mut BTreeMap<String, Cvar>,
}

impl ConsoleContext<'_> {
    pub fn print(&mut self, msg: impl Into<String>) {
        self.output.push(msg.into());
    }

    /// Sets a cvar from user text, honoring its type and flags.
    pub fn set_cvar_text(&mut self, name: &str, text: &str) -> anyhow::Result<CvarValue> {
        let Some(cvar) = self.cvars.get_mut(name) else {
            bail!("unknown cvar: {}", name);
        };
        if cvar.flags.contains(CvarFlags::READ_ONLY) {
            bail!("{} is read-only", name);
        }
        let value = cvar
            .default
            .parse_like(text)
            .with_context(|| format!("invalid value for {}: {}", name, text))?;
        cvar.value = value.clone();
        Ok(value)
    }
}

/// The console.
pub struct Console {
    cvars: BTreeMap<String, Cvar>,
    commands: BTreeMap<String, CommandHandler>,
    history: Vec<String>,
    max_history: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        let mut console = Self {
            cvars: BTreeMap::new(),
            commands: BTreeMap::new(),
            history: Vec::new(),
            max_history: 100,
        };

        // Register built-in commands.
        console.register_builtin_commands();
        console
    }

    fn register_builtin_commands(&mut self) {
        // echo <text>
        self.register_command("echo", |args, ctx| {
            ctx.print(args.join(" "));
            Ok(())
        });

        // cvarlist
        self.register_command("cvarlist", |_args, ctx| {
            let lines: Vec<String> = ctx
                .cvars
                .values()
                .map(|cvar| {
                    format!("  {} = {} (default: {}) - {}", cvar.name, cvar.value, cvar.default, cvar.description)
                })
                .collect();
            for line in lines {
                ctx.print(line);
            }
            Ok(())
        });

        // set <cvar> <value...>
        self.register_command("set", |args, ctx| {
            if args.len() < 2 {
                bail!("usage: set <cvar> <value>");
            }
            let name = args[0];
            let value = ctx.set_cvar_text(name, &args[1..].join(" "))?;
            ctx.print(format!("{} = {}", name, value));
            Ok(())
        });
    }

    /// Registers a console variable.
    pub fn register_cvar(&mut self, name: &str, default: CvarValue, description: &str, flags: CvarFlags) {
        let cvar = Cvar {
            name: name.to_string(),
            value: default.clone(),
            default,
            description: description.to_string(),
            flags,
        };
        self.cvars.insert(name.to_string(), cvar);
    }

    /// Registers a command.
    pub fn register_command<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&[&str], &mut ConsoleContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.commands.insert(name.to_string(), Box::new(handler));
    }

    /// Executes a console command line.
    pub fn exec(&mut self, line: &str) -> anyhow::Result<Vec<String>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Ok(Vec::new());
        }

        // Add to history.
        self.history.push(line.to_string());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        // Parse command and arguments.
        let tokens = parse_command_line(line);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let cmd_name = &tokens[0];
        let args: Vec<&str> = tokens[1..].iter().map(|s| s.as_str()).collect();

        let mut ctx = ConsoleContext {
            output: Vec::new(),
            cvars: &mut self.cvars,
        };

        // Execute command.
        if let Some(handler) = self.commands.get(cmd_name.as_str()) {
            handler(&args, &mut ctx).with_context(|| format!("command '{}'", cmd_name))?;
            return Ok(ctx.output);
        }

        // Check if it's a cvar query/set (just typing the name).
        let summary = ctx
            .cvars
            .get(cmd_name.as_str())
            .map(|cvar| format!("{} = {} (default: {})", cvar.name, cvar.value, cvar.default));
        match summary {
            Some(summary) if args.is_empty() => ctx.print(summary),
            Some(_) => {
                let value = ctx.set_cvar_text(cmd_name, &args.join(" "))?;
                ctx.print(format!("{} = {}", cmd_name, value));
            }
            None => ctx.print(format!("Unknown command: {}", cmd_name)),
        }

        Ok(ctx.output)
    }

    /// Gets a cvar value.
    pub fn get_cvar(&self, name: &str) -> Option<CvarValue> {
        self.cvars.get(name).map(|c| c.value.clone())
    }

    /// Sets a cvar value, bypassing `READ_ONLY`.
    pub fn set_cvar(&mut self, name: &str, value: CvarValue) -> anyhow::Result<()> {
        if let Some(cvar) = self.cvars.get_mut(name) {
            cvar.value = value;
            Ok(())
        } else {
            bail!("unknown cvar: {}", name);
        }
    }

    pub fn float(&self, name: &str) -> anyhow::Result<f32> {
        self.get_cvar(name)
            .and_then(|v| v.as_float())
            .map(|v| v as f32)
            .with_context(|| format!("cvar {} is not a number", name))
    }

    pub fn vec3(&self, name: &str) -> anyhow::Result<Vec3> {
        self.get_cvar(name)
            .and_then(|v| v.as_vec3())
            .with_context(|| format!("cvar {} is not a vector", name))
    }

    /// Gets command history.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

/// Parses a command line into tokens, respecting quotes.
fn parse_command_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_cvar_roundtrip() {
        let mut console = Console::new();
        console.register_cvar("test_var", CvarValue::Float(0.5), "Test variable", CvarFlags::NONE);

        assert_eq!(console.get_cvar("test_var"), Some(CvarValue::Float(0.5)));

        console.exec("set test_var 1.25").unwrap();
        assert_eq!(console.float("test_var").unwrap(), 1.25);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut console = Console::new();
        console.register_cvar("radius", CvarValue::Float(0.5), "Marker radius", CvarFlags::NONE);
        console.register_cvar("point", CvarValue::Vec3(Vec3::ONE), "Query point", CvarFlags::NONE);

        for line in ["radius nan", "radius inf", "point nan 0 0", "point 0 -inf 0", "point 1e39 0 0"] {
            assert!(console.exec(line).is_err(), "{line}");
        }
        assert_eq!(console.float("radius").unwrap(), 0.5);
        assert_eq!(console.vec3("point").unwrap(), Vec3::ONE);
    }

    #[test]
    fn vec3_cvar_by_name() {
        let mut console = Console::new();
        console.register_cvar("point", CvarValue::Vec3(Vec3::ZERO), "Query point", CvarFlags::NONE);

        let out = console.exec("point 1 -2.5 3").unwrap();
        assert_eq!(console.vec3("point").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert_eq!(out, vec!["point = 1.000 -2.500 3.000".to_string()]);

        assert!(console.exec("point 1 2").is_err());
        assert_eq!(console.vec3("point").unwrap(), Vec3::new(1.0, -2.5, 3.0));
    }

    #[test]
    fn read_only_cvar_rejects_user_writes() {
        let mut console = Console::new();
        console.register_cvar("closest", CvarValue::Vec3(Vec3::ZERO), "Closest point", CvarFlags::READ_ONLY);

        assert!(console.exec("closest 1 1 1").is_err());
        console.set_cvar("closest", CvarValue::Vec3(Vec3::ONE)).unwrap();
        assert_eq!(console.vec3("closest").unwrap(), Vec3::ONE);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut console = Console::new();
        let out = console.exec("frobnicate").unwrap();
        assert_eq!(out, vec!["Unknown command: frobnicate".to_string()]);
        assert_eq!(console.history(), ["frobnicate".to_string()]);
    }

    #[test]
    fn parse_quoted_args() {
        let tokens = parse_command_line(r#"echo "hello world" test"#);
        assert_eq!(tokens, vec!["echo", "hello world", "test"]);
    }
}
