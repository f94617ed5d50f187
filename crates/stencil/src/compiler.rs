//! Lowering from tokens to an executable program.
//!
//! Compilation is a single linear pass: one instruction per token, in
//! token order, with no reordering and no dead-code elimination.
//! Embedded sources are carried as raw text - the script language is
//! not parsed or validated here, so a syntax error surfaces only when
//! the program first runs. A strict [`crate::Engine`] can opt into
//! eager validation instead.

use crate::lexer::{Token, TokenKind};

/// A compiled, re-executable template program.
///
/// The program owns all of its data and holds no reference back to the
/// originating tokens or source text. It is immutable and can be run
/// any number of times against different contexts.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
}

/// One executable step of a program.
#[derive(Debug, Clone)]
pub(crate) enum Instruction {
    /// Append the literal text to the output accumulator.
    ///
    /// Literals are owned strings appended directly, so no delimiter
    /// inside the text can terminate them early.
    EmitText(String),
    /// Evaluate the source as an expression, coerce the result to
    /// text, and append it to the accumulator.
    Write(String),
    /// Execute the source as statements. No direct emission; the
    /// statements may rebind scope variables read by later writes.
    Exec(String),
}

impl Program {
    pub(crate) fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate the raw embedded sources (write and statement markers)
    /// in program order. Used for eager syntax validation.
    pub(crate) fn embedded_sources(&self) -> impl Iterator<Item = (&Instruction, &str)> {
        self.instructions.iter().filter_map(|instr| match instr {
            Instruction::EmitText(_) => None,
            Instruction::Write(src) | Instruction::Exec(src) => Some((instr, src.as_str())),
        })
    }
}

/// Lower an ordered token sequence into a [`Program`].
///
/// Infallible and pure: every token becomes exactly one instruction,
/// and instruction order matches token order.
pub fn compile(tokens: Vec<Token>) -> Program {
    let instructions = tokens
        .into_iter()
        .map(|token| match token.kind {
            TokenKind::Text => Instruction::EmitText(token.value),
            TokenKind::Write => Instruction::Write(token.value),
            TokenKind::Statement => Instruction::Exec(token.value),
        })
        .collect();

    Program { instructions }
}
