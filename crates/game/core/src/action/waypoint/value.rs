//! Runtime values produced while evaluating a waypoint expression.

use std::fmt;

use crate::state::Vector;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Value {
    Number(f64),
    Bool(bool),
    Tuple(Vec<Value>),
    List(Vec<Value>),
}

impl Value {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
        }
    }

    /// Numeric view, with booleans counting as 0 and 1.
    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            Value::Tuple(_) | Value::List(_) => None,
        }
    }

    pub(crate) fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) | Value::List(items) => Some(items),
            Value::Number(_) | Value::Bool(_) => None,
        }
    }

    /// Number of values this one is built from, itself included.
    pub(crate) fn weight(&self) -> usize {
        match self {
            Value::Number(_) | Value::Bool(_) => 1,
            Value::Tuple(items) | Value::List(items) => {
                1 + items.iter().map(Value::weight).sum::<usize>()
            }
        }
    }

    /// NaN is truthy, like any other non-zero number.
    pub(crate) fn is_truthy(&self) -> bool {
        match self {
            Value::Number(value) => *value != 0.0,
            Value::Bool(flag) => *flag,
            Value::Tuple(items) | Value::List(items) => !items.is_empty(),
        }
    }

    /// A two-element sequence of numbers. Booleans are not coordinates.
    pub(crate) fn as_coordinate(&self) -> Option<Vector> {
        match self.items()? {
            [Value::Number(x), Value::Number(y)] => Some(Vector::new(*x, *y)),
            _ => None,
        }
    }

    /// Sorts a result into paths of player-frame coordinates.
    ///
    /// Checked in order: a single coordinate, a non-empty list of coordinates,
    /// a non-empty list of non-empty lists of coordinates.
    pub(crate) fn to_paths(&self) -> Option<Vec<Vec<Vector>>> {
        if let Some(coord) = self.as_coordinate() {
            return Some(vec![vec![coord]]);
        }

        let items = self.items().filter(|items| !items.is_empty())?;

        if let Some(path) = coordinates(items) {
            return Some(vec![path]);
        }

        items
            .iter()
            .map(|item| item.items().filter(|inner| !inner.is_empty()).and_then(coordinates))
            .collect()
    }
}

fn coordinates(items: &[Value]) -> Option<Vec<Vector>> {
    items.iter().map(Value::as_coordinate).collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }

        match self {
            Value::Number(value) if value.is_nan() => write!(f, "any"),
            Value::Number(value) => write!(f, "{}", value),
            Value::Bool(flag) => write!(f, "{}", flag),
            Value::Tuple(items) => {
                write!(f, "(")?;
                join(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                join(f, items)?;
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(x: f64, y: f64) -> Value {
        Value::Tuple(vec![Value::Number(x), Value::Number(y)])
    }

    #[test]
    fn single_coordinate_is_one_path_of_one_waypoint() {
        assert_eq!(
            coord(1.0, 2.0).to_paths(),
            Some(vec![vec![Vector::new(1.0, 2.0)]])
        );
    }

    #[test]
    fn two_number_list_counts_as_coordinate() {
        let value = Value::List(vec![Value::Number(3.0), Value::Number(4.0)]);
        assert_eq!(value.to_paths(), Some(vec![vec![Vector::new(3.0, 4.0)]]));
    }

    #[test]
    fn list_of_lists_is_many_paths() {
        let value = Value::List(vec![
            Value::List(vec![coord(0.0, 1.0)]),
            Value::List(vec![coord(1.0, 1.0), coord(2.0, 2.0)]),
        ]);
        assert_eq!(
            value.to_paths(),
            Some(vec![
                vec![Vector::new(0.0, 1.0)],
                vec![Vector::new(1.0, 1.0), Vector::new(2.0, 2.0)],
            ])
        );
    }

    #[test]
    fn rejects_empty_ragged_and_scalar_results() {
        assert_eq!(Value::List(vec![]).to_paths(), None);
        assert_eq!(Value::Number(1.0).to_paths(), None);
        assert_eq!(
            Value::List(vec![Value::List(vec![coord(0.0, 1.0)]), Value::List(vec![])]).to_paths(),
            None
        );
        assert_eq!(
            Value::List(vec![coord(0.0, 1.0), Value::List(vec![coord(1.0, 1.0)])]).to_paths(),
            None
        );
        assert_eq!(
            Value::Tuple(vec![Value::Bool(true), Value::Number(1.0)]).to_paths(),
            None
        );
        assert_eq!(
            Value::Tuple(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
                .to_paths(),
            None
        );
    }

    #[test]
    fn display_renders_literal_syntax() {
        let value = Value::List(vec![
            coord(1.0, f64::NAN),
            Value::Tuple(vec![Value::Number(2.5)]),
        ]);
        assert_eq!(value.to_string(), "[(1, any), (2.5,)]");
    }
}
