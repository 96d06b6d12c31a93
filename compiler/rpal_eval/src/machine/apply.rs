//! `gamma`: application of the value on top of the stack.
//!
//! | Operator | Operand | Result |
//! |---|---|---|
//! | tuple | index `i` | element `i` (1-based, reversed storage), or `nil` |
//! | `Y*` | closure | fixed-point wrapper around the closure |
//! | wrapper | any | wrapper and closure pushed back, two more `gamma`s |
//! | closure | any | fresh environment, scope marker, body |
//! | builtin | any | the builtin's result |
//! | anything else | any | error value |

use std::rc::Rc;

use rpal_ir::{ControlToken, Name};
use smallvec::{smallvec, SmallVec};

use super::Machine;
use crate::errors::MachineError;
use crate::value::{Elements, Number};
use crate::Value;

impl Machine {
    pub(super) fn apply(&mut self) -> Result<(), MachineError> {
        let rator = self.pop("gamma")?;
        match rator {
            Value::Tuple(elements) => {
                let index = self.pop("gamma")?;
                self.stack.push(select(&elements, &index));
            }
            Value::FixedPointOperator => {
                let value = match self.pop("gamma")? {
                    Value::Closure(closure) => Value::FixedPoint(closure),
                    other => Value::error(format!(
                        "`Y*` expects a function, found {}",
                        other.type_name()
                    )),
                };
                self.stack.push(value);
            }
            Value::FixedPoint(closure) => {
                // The closure is applied to the wrapper, and whatever it
                // returns is applied to the original operand.
                self.stack.push(Value::FixedPoint(Rc::clone(&closure)));
                self.stack.push(Value::Closure(closure));
                self.control.push(ControlToken::Gamma);
                self.control.push(ControlToken::Gamma);
            }
            Value::Closure(closure) => {
                let argument = self.pop("gamma")?;
                let bindings = bind_parameters(&closure.params, argument);
                let env = self.environments.create(&closure.env, bindings);
                tracing::trace!(env = %env.id(), delta = %closure.delta, "entering closure");
                self.control.push(ControlToken::Environment(env.id()));
                self.control.push(ControlToken::DeltaRef(closure.delta));
                self.stack.push(Value::Env(env));
            }
            Value::Builtin(builtin) => {
                let argument = self.pop("gamma")?;
                let result = builtin.apply(argument, &self.print);
                self.stack.push(result);
            }
            other => {
                let argument = self.pop("gamma")?;
                self.stack.push(Value::error(format!(
                    "cannot apply {} to {argument}",
                    other.type_name()
                )));
            }
        }
        Ok(())
    }
}

/// Element `index` of a tuple, counting from 1 over the reversed storage.
/// Anything that is not an in-range integer selects `nil`.
fn select(elements: &[Value], index: &Value) -> Value {
    let Some(Number::Int(index)) = index.as_number() else {
        return Value::Nil;
    };
    usize::try_from(index)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|offset| Value::indexed_elements(elements).nth(offset))
        .cloned()
        .unwrap_or(Value::Nil)
}

/// Name/value pairs for a new environment.
pub type Bindings = SmallVec<[(Name, Value); 2]>;

/// Bind a closure's parameters to its argument.
///
/// One parameter takes the argument as is. Several parameters destructure a
/// tuple (a non-tuple counts as a one-element tuple): with exactly two
/// parameters and at least two elements the first parameter takes element 1
/// and the second element 0; otherwise parameter `i` takes element
/// `len - 1 - i`, and parameters past the end are bound to `nil`.
pub fn bind_parameters(params: &[Name], argument: Value) -> Bindings {
    if let [param] = params {
        return smallvec![(param.clone(), argument)];
    }

    let elements: Rc<Elements> = match argument {
        Value::Tuple(elements) => elements,
        other => Rc::new(Elements::from(vec![other])),
    };

    if let ([first, second], [element0, element1, ..]) = (params, elements.as_slice()) {
        return smallvec![
            (first.clone(), element1.clone()),
            (second.clone(), element0.clone()),
        ];
    }

    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let value = elements
                .len()
                .checked_sub(i + 1)
                .and_then(|k| elements.get(k))
                .cloned()
                .unwrap_or(Value::Nil);
            (param.clone(), value)
        })
        .collect()
}
