use crate::distribution::{Distribution, ParametricDistribution, MAX_PARAMETER_ERROR};
use regex::Regex;
use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

lazy_static! {
    /// Matches `Name (p1;p2;...)`, capturing the name and the raw parameter list.
    static ref WITH_PARAMETERS: Regex =
        Regex::new(r"^\s*([^()]*[^()\s])\s*\(([^()]*)\)\s*$").unwrap();
    /// Matches a bare family name without parameters.
    static ref NAME_ONLY: Regex = Regex::new(r"^\s*([^()\s;](?:[^();]*[^()\s;])?)\s*$").unwrap();
}

impl ParametricDistribution {
    /// Create a new distribution of the given family.
    ///
    /// The name cannot be empty and cannot contain parentheses or semicolons (these are
    /// used by the textual format). Parameters must be finite.
    pub fn new(name: &str, parameters: &[f64]) -> Result<ParametricDistribution, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Distribution name cannot be empty.".to_string());
        }
        if name.contains(|c: char| c == '(' || c == ')' || c == ';') {
            return Err(format!(
                "Distribution name `{}` contains a reserved character.",
                name
            ));
        }
        if let Some(p) = parameters.iter().find(|p| !p.is_finite()) {
            return Err(format!(
                "Parameter {} of distribution `{}` is not finite.",
                p, name
            ));
        }
        Ok(ParametricDistribution {
            name: name.to_string(),
            parameters: parameters.to_vec(),
        })
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// Update one parameter of this distribution.
    ///
    /// Returns `Err` if the index is out of bounds or the value is not finite.
    pub fn set_parameter(&mut self, index: usize, value: f64) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("Parameter {} is not finite.", value));
        }
        if let Some(p) = self.parameters.get_mut(index) {
            *p = value;
            Ok(())
        } else {
            Err(format!(
                "Distribution `{}` has no parameter {}.",
                self.name, index
            ))
        }
    }
}

impl Distribution for ParametricDistribution {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, String> {
        ParametricDistribution::try_from(text)
    }
}

impl Display for ParametricDistribution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.parameters.is_empty() {
            write!(f, " (")?;
            for (i, p) in self.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ";")?;
                }
                write!(f, "{}", p)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for ParametricDistribution {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if let Some(captures) = WITH_PARAMETERS.captures(value) {
            let name = &captures[1];
            let raw = captures[2].trim();
            if raw.is_empty() {
                return Err(format!("Distribution `{}` has an empty parameter list.", name));
            }
            let mut parameters = Vec::new();
            for item in raw.split(';') {
                let item = item.trim();
                match item.parse::<f64>() {
                    Ok(p) => parameters.push(p),
                    Err(_) => {
                        return Err(format!(
                            "Invalid parameter `{}` of distribution `{}`.",
                            item, name
                        ))
                    }
                }
            }
            ParametricDistribution::new(name, &parameters)
        } else if let Some(captures) = NAME_ONLY.captures(value) {
            ParametricDistribution::new(&captures[1], &[])
        } else {
            Err(format!("`{}` is not a valid distribution.", value.trim()))
        }
    }
}

impl PartialEq for ParametricDistribution {
    fn eq(&self, other: &Self) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(other.parameters.iter())
                .all(|(a, b)| (a - b).abs() <= MAX_PARAMETER_ERROR)
    }
}
