//! Arithmetic over earlier number inputs.
//!
//! A calculus step never holds the numbers themselves: it stores the indices of
//! the NumberInput steps it reads and resolves them against the owning flow each
//! time a result is needed, so values entered later in a replay are picked up.
use super::Step;
use crate::util::format_number;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
}

impl Operation {
    pub const SYMBOLS: &'static str = "+, -, *, /, m (min), M (max)";

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Subtract),
            '*' => Some(Operation::Multiply),
            '/' => Some(Operation::Divide),
            'm' => Some(Operation::Min),
            'M' => Some(Operation::Max),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
            Operation::Min => 'm',
            Operation::Max => 'M',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "Addition",
            Operation::Subtract => "Subtraction",
            Operation::Multiply => "Multiplication",
            Operation::Divide => "Division",
            Operation::Min => "Minimum",
            Operation::Max => "Maximum",
        }
    }

    fn function_name(self) -> Option<&'static str> {
        match self {
            Operation::Min => Some("min"),
            Operation::Max => Some("max"),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CalcError {
    #[error("No number input step from previous steps. Cancelling calculation.")]
    NoNumberInputs,
    #[error("Invalid number of selected inputs ({0}). Cancelling calculation.")]
    WrongOperandCount(usize),
    #[error("Division by zero detected. Cancelling calculation.")]
    DivisionByZero,
}

/// Left fold of `operands` under `operation`.
///
/// Add starts from 0 and Multiply from 1; the other operations seed with the
/// first operand. An empty operand list yields the fold's starting value (0 for
/// everything but Multiply).
pub fn compute(operation: Operation, operands: &[f64]) -> Result<f64, CalcError> {
    match operation {
        Operation::Add => Ok(operands.iter().fold(0.0, |acc, x| acc + x)),
        Operation::Multiply => Ok(operands.iter().product()),
        Operation::Subtract => Ok(seeded(operands, |acc, x| acc - x)),
        Operation::Min => Ok(seeded(operands, f64::min)),
        Operation::Max => Ok(seeded(operands, f64::max)),
        Operation::Divide => {
            let Some((&seed, rest)) = operands.split_first() else {
                return Ok(0.0);
            };
            rest.iter().try_fold(seed, |acc, &x| {
                if x == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    Ok(acc / x)
                }
            })
        }
    }
}

fn seeded(operands: &[f64], op: impl Fn(f64, f64) -> f64) -> f64 {
    match operands.split_first() {
        Some((&seed, rest)) => rest.iter().fold(seed, |acc, &x| op(acc, x)),
        None => 0.0,
    }
}

/// `a + b` for infix operations, `min(a, b)` for Min/Max.
pub fn render_expression(operation: Operation, operands: &[f64]) -> String {
    let rendered: Vec<String> = operands.iter().map(|v| format_number(*v)).collect();
    match operation.function_name() {
        Some(name) => format!("{name}({})", rendered.join(", ")),
        None => rendered.join(&format!(" {} ", operation.symbol())),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalculusStep {
    pub operation: Operation,
    /// Indices of the selected NumberInput steps, in flow order.
    pub operands: Vec<usize>,
}

impl CalculusStep {
    pub fn symbol(&self) -> char {
        self.operation.symbol()
    }

    /// Current values of the selected operands. `prior` is the flow prefix
    /// before this step; indices that do not name a NumberInput are ignored.
    pub fn operand_values(&self, prior: &[Step]) -> Vec<f64> {
        self.operands
            .iter()
            .filter_map(|&index| match prior.get(index) {
                Some(Step::NumberInput(input)) => Some(input.value),
                _ => None,
            })
            .collect()
    }

    pub fn result(&self, prior: &[Step]) -> Result<f64, CalcError> {
        compute(self.operation, &self.operand_values(prior))
    }

    /// Expression followed by ` = <result>`, as shown by Display and Output.
    pub fn render(&self, prior: &[Step]) -> String {
        let values = self.operand_values(prior);
        if values.is_empty() {
            return format!("no operands selected ({})", self.symbol());
        }
        let expression = render_expression(self.operation, &values);
        match compute(self.operation, &values) {
            Ok(result) => format!("{expression} = {}", format_number(result)),
            Err(err) => format!("{expression} = undefined ({err})"),
        }
    }
}
