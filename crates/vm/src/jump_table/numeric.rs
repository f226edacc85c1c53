//! Numeric, comparison and logical operators operating on integers, booleans
//! and byte strings coerced to integers.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_context::ExecutionContext;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::INC, inc);
    jump_table.register(OpCode::DEC, dec);
    jump_table.register(OpCode::SIGN, sign);
    jump_table.register(OpCode::NEGATE, negate);
    jump_table.register(OpCode::ABS, abs);
    jump_table.register(OpCode::ADD, add);
    jump_table.register(OpCode::SUB, sub);
    jump_table.register(OpCode::MUL, mul);
    jump_table.register(OpCode::DIV, div);
    jump_table.register(OpCode::MOD, modulo);
    jump_table.register(OpCode::POW, pow);
    jump_table.register(OpCode::SQRT, sqrt);
    jump_table.register(OpCode::SHL, shl);
    jump_table.register(OpCode::SHR, shr);
    jump_table.register(OpCode::MIN, min);
    jump_table.register(OpCode::MAX, max);
    jump_table.register(OpCode::WITHIN, within);
    jump_table.register(OpCode::LT, lt);
    jump_table.register(OpCode::LE, le);
    jump_table.register(OpCode::GT, gt);
    jump_table.register(OpCode::GE, ge);
    jump_table.register(OpCode::NUMEQUAL, numequal);
    jump_table.register(OpCode::NUMNOTEQUAL, numnotequal);
    jump_table.register(OpCode::NOT, not);
    jump_table.register(OpCode::BOOLAND, booland);
    jump_table.register(OpCode::BOOLOR, boolor);
    jump_table.register(OpCode::NZ, nz);
    jump_table.register(OpCode::MODMUL, modmul);
    jump_table.register(OpCode::MODPOW, modpow);
}

fn context(engine: &mut ExecutionEngine) -> VmResult<&mut ExecutionContext> {
    engine.current_context_mut().ok_or_else(|| VmError::invalid_operation_msg("No current context"))
}

fn pop_int(ctx: &mut ExecutionContext) -> VmResult<BigInt> {
    ctx.pop()?.as_int()
}

/// Pops two operands in (first-pushed, second-pushed) order.
fn pop_two_ints(ctx: &mut ExecutionContext) -> VmResult<(BigInt, BigInt)> {
    let b = pop_int(ctx)?;
    let a = pop_int(ctx)?;
    Ok((a, b))
}

fn unary(engine: &mut ExecutionEngine, f: impl FnOnce(BigInt) -> BigInt) -> VmResult<()> {
    let ctx = context(engine)?;
    let value = pop_int(ctx)?;
    ctx.push(StackItem::from_int(f(value)))
}

fn binary(engine: &mut ExecutionEngine, f: impl FnOnce(BigInt, BigInt) -> VmResult<BigInt>) -> VmResult<()> {
    let ctx = context(engine)?;
    let (a, b) = pop_two_ints(ctx)?;
    ctx.push(StackItem::from_int(f(a, b)?))
}

/// Shared null-aware comparison used by LT/LE/GT/GE/NUMEQUAL/NUMNOTEQUAL.
fn compare(engine: &mut ExecutionEngine, f: impl FnOnce(&StackItem, &StackItem) -> VmResult<bool>) -> VmResult<()> {
    let ctx = context(engine)?;
    let b = ctx.pop()?;
    let a = ctx.pop()?;
    let result = f(&a, &b)?;
    ctx.push(StackItem::from_bool(result))
}

fn numeric_equal(a: &StackItem, b: &StackItem) -> VmResult<bool> {
    Ok(match (a, b) {
        (StackItem::Null, StackItem::Null) => true,
        (StackItem::Null, _) | (_, StackItem::Null) => false,
        (StackItem::Boolean(x), StackItem::Boolean(y)) => x == y,
        _ => a.as_int()? == b.as_int()?,
    })
}

fn inc(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary(engine, |v| v + BigInt::one())
}

fn dec(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary(engine, |v| v - BigInt::one())
}

fn sign(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary(engine, |v| {
        if v.is_zero() {
            BigInt::zero()
        } else if v.is_positive() {
            BigInt::one()
        } else {
            -BigInt::one()
        }
    })
}

fn negate(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary(engine, |v| -v)
}

fn abs(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary(engine, |v| v.abs())
}

fn add(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let b = ctx.pop()?;
    let a = ctx.pop()?;
    let result = match (a, b) {
        (StackItem::ByteString(mut a), StackItem::ByteString(b)) => {
            a.extend_from_slice(&b);
            StackItem::from_byte_string(a)
        }
        (StackItem::Buffer(mut a), StackItem::Buffer(b)) => {
            a.extend_from_slice(&b);
            StackItem::Buffer(a)
        }
        (a, b) => StackItem::from_int(a.as_int()? + b.as_int()?),
    };
    ctx.push(result)
}

fn sub(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| Ok(a - b))
}

fn mul(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| Ok(a * b))
}

fn div(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| {
        if b.is_zero() {
            return Err(VmError::invalid_operation_msg("Division by zero"));
        }
        Ok(a / b)
    })
}

fn modulo(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| {
        if b.is_zero() {
            return Err(VmError::invalid_operation_msg("Division by zero"));
        }
        Ok(a % b)
    })
}

fn pow(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| {
        if b.is_negative() {
            return Err(VmError::invalid_operation_msg("Negative exponent"));
        }
        let exponent = b.to_u32().ok_or_else(|| VmError::invalid_operation_msg("Exponent too large"))?;
        Ok(a.pow(exponent))
    })
}

/// Integer square root via Newton's method.
fn integer_sqrt(value: &BigInt) -> BigInt {
    if value.is_zero() || value == &BigInt::from(1) {
        return value.clone();
    }
    let mut x = value.clone();
    let mut y: BigInt = (value + 1) / 2;
    while y < x {
        x = y.clone();
        y = (&x + value / &x) / 2;
    }
    x
}

fn sqrt(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary_fallible(engine, |v| {
        if v.is_negative() {
            return Err(VmError::invalid_operation_msg("Square root of negative number"));
        }
        Ok(if v.is_zero() { BigInt::zero() } else { integer_sqrt(&v) })
    })
}

fn unary_fallible(engine: &mut ExecutionEngine, f: impl FnOnce(BigInt) -> VmResult<BigInt>) -> VmResult<()> {
    let ctx = context(engine)?;
    let value = pop_int(ctx)?;
    ctx.push(StackItem::from_int(f(value)?))
}

fn shl(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| {
        if b.is_negative() {
            return Err(VmError::invalid_operation_msg("Negative shift amount"));
        }
        let shift = b.to_u32().ok_or_else(|| VmError::invalid_operation_msg("Shift amount too large"))?;
        Ok(a << shift)
    })
}

fn shr(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| {
        if b.is_negative() {
            return Err(VmError::invalid_operation_msg("Negative shift amount"));
        }
        let shift = b.to_u32().ok_or_else(|| VmError::invalid_operation_msg("Shift amount too large"))?;
        Ok(a >> shift)
    })
}

fn min(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| Ok(if a < b { a } else { b }))
}

fn max(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    binary(engine, |a, b| Ok(if a > b { a } else { b }))
}

fn within(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let b = pop_int(ctx)?;
    let a = pop_int(ctx)?;
    let x = pop_int(ctx)?;
    ctx.push(StackItem::from_bool(a <= x && x < b))
}

fn lt(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    compare(engine, |a, b| {
        Ok(match (a, b) {
            (StackItem::Null, StackItem::Null) | (_, StackItem::Null) => false,
            (StackItem::Null, _) => true,
            _ => a.as_int()? < b.as_int()?,
        })
    })
}

fn le(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    compare(engine, |a, b| {
        Ok(match (a, b) {
            (StackItem::Null, _) => true,
            (_, StackItem::Null) => false,
            _ => a.as_int()? <= b.as_int()?,
        })
    })
}

fn gt(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    compare(engine, |a, b| {
        Ok(match (a, b) {
            (_, StackItem::Null) => true,
            (StackItem::Null, _) => false,
            _ => a.as_int()? > b.as_int()?,
        })
    })
}

fn ge(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    compare(engine, |a, b| {
        Ok(match (a, b) {
            (StackItem::Null, StackItem::Null) | (_, StackItem::Null) => true,
            (StackItem::Null, _) => false,
            _ => a.as_int()? >= b.as_int()?,
        })
    })
}

fn numequal(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    compare(engine, numeric_equal)
}

fn numnotequal(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    compare(engine, |a, b| Ok(!numeric_equal(a, b)?))
}

fn not(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let value = ctx.pop()?;
    let result = match value {
        StackItem::Boolean(b) => !b,
        StackItem::Integer(i) => i.is_zero(),
        StackItem::Null => true,
        _ => false,
    };
    ctx.push(StackItem::from_bool(result))
}

fn booland(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let b = ctx.pop()?.as_bool()?;
    let a = ctx.pop()?.as_bool()?;
    ctx.push(StackItem::from_bool(a && b))
}

fn boolor(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let b = ctx.pop()?.as_bool()?;
    let a = ctx.pop()?.as_bool()?;
    ctx.push(StackItem::from_bool(a || b))
}

fn nz(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    unary_predicate(engine, |v| !v.is_zero())
}

fn unary_predicate(engine: &mut ExecutionEngine, f: impl FnOnce(&BigInt) -> bool) -> VmResult<()> {
    let ctx = context(engine)?;
    let value = pop_int(ctx)?;
    let result = f(&value);
    ctx.push(StackItem::from_bool(result))
}

fn modmul(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let modulus = pop_int(ctx)?;
    let b = pop_int(ctx)?;
    let a = pop_int(ctx)?;
    if modulus.is_zero() {
        return Err(VmError::division_by_zero_msg("division"));
    }
    ctx.push(StackItem::from_int((a * b) % modulus))
}

fn modpow(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    let ctx = context(engine)?;
    let modulus = pop_int(ctx)?;
    let exponent = pop_int(ctx)?;
    let base = pop_int(ctx)?;
    if modulus.is_zero() {
        return Err(VmError::division_by_zero_msg("division"));
    }
    if exponent.is_negative() {
        return Err(VmError::invalid_operation_msg("Negative exponent not supported"));
    }
    ctx.push(StackItem::from_int(base.modpow(&exponent, &modulus)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;

    fn engine_with(values: &[i64]) -> ExecutionEngine {
        let mut engine = ExecutionEngine::new(None);
        engine.load_script(Script::new(vec![], false).unwrap(), -1, 0).unwrap();
        for v in values {
            engine.current_context_mut().unwrap().push(StackItem::from_int(*v)).unwrap();
        }
        engine
    }

    fn top_int(engine: &mut ExecutionEngine) -> BigInt {
        engine.current_context_mut().unwrap().pop().unwrap().as_int().unwrap()
    }

    fn top_bool(engine: &mut ExecutionEngine) -> bool {
        engine.current_context_mut().unwrap().pop().unwrap().as_bool().unwrap()
    }

    #[test]
    fn add_sub_mul_div_mod_on_integers() {
        let mut engine = engine_with(&[10, 3]);
        add(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(13));

        let mut engine = engine_with(&[10, 3]);
        sub(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(7));

        let mut engine = engine_with(&[10, 3]);
        div(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(3));

        let mut engine = engine_with(&[10, 3]);
        modulo(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(1));
    }

    #[test]
    fn div_and_mod_by_zero_fail() {
        assert!(div(&mut engine_with(&[10, 0]), &Instruction::ret()).is_err());
        assert!(modulo(&mut engine_with(&[10, 0]), &Instruction::ret()).is_err());
    }

    #[test]
    fn sqrt_and_pow_match_expected_values() {
        let mut engine = engine_with(&[9]);
        sqrt(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(3));

        let mut engine = engine_with(&[2, 10]);
        pow(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(1024));
    }

    #[test]
    fn comparisons_handle_null_on_either_side() {
        let mut engine = ExecutionEngine::new(None);
        engine.load_script(Script::new(vec![], false).unwrap(), -1, 0).unwrap();
        let ctx = engine.current_context_mut().unwrap();
        ctx.push(StackItem::Null).unwrap();
        ctx.push(StackItem::from_int(5)).unwrap();
        lt(&mut engine, &Instruction::ret()).unwrap();
        assert!(top_bool(&mut engine));
    }

    #[test]
    fn within_checks_half_open_range() {
        let mut engine = engine_with(&[5, 0, 10]);
        within(&mut engine, &Instruction::ret()).unwrap();
        assert!(top_bool(&mut engine));
    }

    #[test]
    fn modmul_and_modpow_reduce_by_modulus() {
        let mut engine = engine_with(&[7, 8, 5]);
        modmul(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(1));

        let mut engine = engine_with(&[2, 5, 7]);
        modpow(&mut engine, &Instruction::ret()).unwrap();
        assert_eq!(top_int(&mut engine), BigInt::from(4));
    }
}
