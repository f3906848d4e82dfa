use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, multispace0, multispace1};
use nom::combinator::{map_res, value};
use nom::sequence::preceded;
use nom::IResult;

use crate::error::{CpppError, MalformedInputStage};

/// Row (species) identifier in `0..n_orig`.
pub type SpeciesId = usize;
/// Column (character) identifier in `0..m_orig`.
pub type CharacterId = usize;

/** A loaded species-by-character matrix, kept read-only and shared by every
state of one search so the conflict graph can always be rebuilt from
scratch after a realization. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// number of species (rows)
    pub n_orig: usize,
    /// number of characters (columns)
    pub m_orig: usize,
    /// row-major 0/1 values, length `n_orig * m_orig`
    matrix: Vec<u8>,
}

impl Instance {
    /// `matrix[s][c]`, the raw input value (not affected by any realization).
    pub fn value(&self, s: SpeciesId, c: CharacterId) -> u8 {
        self.matrix[s * self.m_orig + c]
    }

    /// vertex id of character `c` in the red-black graph's `n_orig + m_orig`
    /// vertex numbering.
    pub fn character_vertex(&self, c: CharacterId) -> usize {
        self.n_orig + c
    }
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(preceded(multispace0, digit1), str::parse)(input)
}

fn bit(input: &str) -> IResult<&str, u8> {
    preceded(
        multispace0,
        alt((value(0u8, tag("0")), value(1u8, tag("1")))),
    )(input)
}

/** Parses instances out of a concatenated text stream (§4.2, §6.1).

Each instance is `n m` followed by `n*m` whitespace-separated 0/1 tokens;
multiple instances may be concatenated back to back, and plain EOF
between instances terminates the stream.
*/
#[derive(Debug)]
pub struct MatrixLoader<'a> {
    remaining: &'a str,
    next_index: usize,
}

impl<'a> MatrixLoader<'a> {
    /// Wraps a complete input stream.
    pub fn new(input: &'a str) -> Self {
        Self {
            remaining: input,
            next_index: 0,
        }
    }

    /// Reads the next instance, or `None` at a clean EOF between instances.
    pub fn read_next(&mut self) -> Result<Option<Instance>, CpppError> {
        let (rest, _) = multispace0::<_, nom::error::Error<&str>>(self.remaining)
            .expect("multispace0 never fails");
        if rest.is_empty() {
            return Ok(None);
        }
        let instance_ix = self.next_index;
        self.next_index += 1;
        let malformed = |stage: MalformedInputStage, reason: &str| CpppError::MalformedInput {
            instance: instance_ix,
            stage,
            reason: reason.to_string(),
        };

        let (rest, n) = number(rest)
            .map_err(|_| malformed(MalformedInputStage::Header, "expected species count `n`"))?;
        let (rest, m) = number(rest)
            .map_err(|_| malformed(MalformedInputStage::Header, "expected character count `m`"))?;

        let mut matrix = Vec::with_capacity(n * m);
        let mut cursor = rest;
        for _ in 0..(n * m) {
            let (_, remainder) = multispace0::<_, nom::error::Error<&str>>(cursor)
                .expect("multispace0 never fails");
            if remainder.is_empty() {
                return Err(malformed(
                    MalformedInputStage::MidInstance,
                    "stream ended before all cells were read",
                ));
            }
            let (rest, v) = bit(cursor)
                .map_err(|_| malformed(MalformedInputStage::Cells, "expected a 0/1 token"))?;
            matrix.push(v);
            cursor = rest;
        }
        self.remaining = cursor;

        Ok(Some(Instance {
            n_orig: n,
            m_orig: m,
            matrix,
        }))
    }
}
