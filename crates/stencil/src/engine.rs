//! The template engine: compile-time policy, the run loop, and the
//! failure-isolation boundary.

use std::collections::HashMap;

use bon::Builder;

use crate::compiler::{Instruction, Program, compile};
use crate::lexer::{Token, tokenize};
use crate::runtime::{
    ReportSink, Scope, TemplateError, TracingSink, eval_expression, eval_statements,
};
use crate::script::{parse_expression, parse_statements};
use crate::types::Value;

/// A configured template engine.
///
/// The engine holds no state between calls: programs are pure values
/// and every run gets a fresh scope, so one engine can render any
/// number of templates.
///
/// # Example
///
/// ```
/// use stencil::{Engine, context};
///
/// let engine = Engine::builder().build();
/// let out = engine.render("Hello, [=`name`]!", &context! { "name" => "Ana" }).unwrap();
/// assert_eq!(out, "Hello, Ana!");
/// ```
#[derive(Builder)]
pub struct Engine {
    /// Observability sink notified of failed runs before the error
    /// propagates to the caller.
    #[builder(default = Box::new(TracingSink))]
    sink: Box<dyn ReportSink>,

    /// Validate embedded syntax eagerly at compile time.
    ///
    /// Off by default: the permissive mode, where syntax errors
    /// surface on first run, is the engine's documented behavior.
    #[builder(default)]
    strict: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::builder().build()
    }
}

impl Engine {
    /// Lower tokens into a program.
    ///
    /// Permissive engines never fail here; strict engines parse every
    /// embedded source up front and reject the first syntax error.
    pub fn compile(&self, tokens: Vec<Token>) -> Result<Program, TemplateError> {
        let program = compile(tokens);
        if self.strict {
            for (instruction, source) in program.embedded_sources() {
                if source.trim().is_empty() {
                    continue;
                }
                match instruction {
                    Instruction::Write(_) => {
                        parse_expression(source)?;
                    }
                    Instruction::Exec(_) => {
                        parse_statements(source)?;
                    }
                    Instruction::EmitText(_) => {}
                }
            }
        }
        Ok(program)
    }

    /// Execute a program once against a context, producing the
    /// generated text.
    ///
    /// The whole run sits inside one failure-isolation boundary: any
    /// error is reported to the sink and then returned - never
    /// suppressed, and never accompanied by partial output.
    pub fn run(
        &self,
        program: &Program,
        context: &HashMap<String, Value>,
    ) -> Result<String, TemplateError> {
        match self.execute(program, context) {
            Ok(output) => Ok(output),
            Err(error) => {
                self.sink.report(&error);
                Err(error)
            }
        }
    }

    /// Tokenize, compile, and run in one call.
    ///
    /// Purely a convenience over the three steps; compile-time
    /// failures (strict mode) pass through the sink like run
    /// failures do.
    pub fn render(
        &self,
        source: &str,
        context: &HashMap<String, Value>,
    ) -> Result<String, TemplateError> {
        let program = match self.compile(tokenize(source)) {
            Ok(program) => program,
            Err(error) => {
                self.sink.report(&error);
                return Err(error);
            }
        };
        self.run(&program, context)
    }

    /// The run loop: one pass over the instructions, strictly in
    /// order, each instruction completing before the next begins.
    fn execute(
        &self,
        program: &Program,
        context: &HashMap<String, Value>,
    ) -> Result<String, TemplateError> {
        let mut scope = Scope::new(context);
        let mut output = String::new();

        for instruction in program.instructions() {
            match instruction {
                Instruction::EmitText(text) => output.push_str(text),
                Instruction::Write(source) => {
                    // An empty marker body emits the empty string.
                    if source.trim().is_empty() {
                        continue;
                    }
                    let expr = parse_expression(source)?;
                    let value = eval_expression(&expr, &scope)?;
                    output.push_str(&value.to_string());
                }
                Instruction::Exec(source) => {
                    let stmts = parse_statements(source)?;
                    eval_statements(&stmts, &mut scope)?;
                }
            }
        }

        Ok(output)
    }
}

/// Render a template with a default engine.
///
/// Composes `tokenize -> compile -> run` against a fresh permissive
/// [`Engine`] with the `tracing` sink.
pub fn render(source: &str, context: &HashMap<String, Value>) -> Result<String, TemplateError> {
    Engine::default().render(source, context)
}
