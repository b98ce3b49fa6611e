//! Instruction handlers.
//!
//! Each handler runs with PC still pointing at its own opcode and is solely
//! responsible for moving it. MOVE.B, ADD.L, SUB.W and CMP.B leave PC where
//! it is, so a host that keeps stepping without advancing PC re-executes the
//! same instruction.
//!
//! Every bus read a handler needs happens before its first register write.

use std::cmp::Ordering;

use emu_core::{Bus, BusError};

use crate::decode::Operands;
use crate::flags::{Condition, Flag};
use crate::registers::Registers;

/// Everything a handler may touch for one step.
pub struct Context<'a> {
    pub regs: &'a mut Registers,
    pub bus: &'a mut dyn Bus,
}

/// Signature shared by every decode table entry.
pub type Handler = fn(&mut Context<'_>, Operands) -> Result<(), BusError>;

/// RTS: pop the return address from the stack into PC.
///
/// Only V is touched (cleared).
pub fn rts(ctx: &mut Context<'_>, _ops: Operands) -> Result<(), BusError> {
    let sp = ctx.regs.sp();
    let target = ctx.bus.read_long(sp)?;
    ctx.regs.set_pc(target);
    ctx.regs.set_sp(sp.wrapping_add(4));
    ctx.regs.ccr.set(Flag::Overflow, false);
    Ok(())
}

/// MOVE.B Ds,Dd
pub fn move_byte(ctx: &mut Context<'_>, ops: Operands) -> Result<(), BusError> {
    let value = ctx.regs.d(ops.src) as u8;
    ctx.regs.set_d_byte(ops.dst, value);
    ctx.regs.ccr.set_move_byte(value);
    Ok(())
}

/// ADD.L Ds,Dd
///
/// The sum is formed in 64 bits so the carry out of bit 31 is exact. V is
/// always cleared; signed overflow is not computed.
pub fn add_long(ctx: &mut Context<'_>, ops: Operands) -> Result<(), BusError> {
    let src = ctx.regs.d(ops.src);
    let dst = ctx.regs.d(ops.dst);
    let wide = u64::from(dst) + u64::from(src);
    let result = wide as u32;
    ctx.regs.set_d(ops.dst, result);
    ctx.regs
        .ccr
        .set_from(result == 0, result & 0x8000_0000 != 0, wide > 0xFFFF_FFFF, false);
    Ok(())
}

/// SUB.W Ds,Ad
///
/// Signed 16-bit subtract of the low words. The result is zero-extended back
/// into the address register. Flags fall into three fixed patterns keyed on
/// the sign of the untruncated difference: zero sets Z alone, negative sets
/// N, V and C, positive clears all four.
pub fn sub_word(ctx: &mut Context<'_>, ops: Operands) -> Result<(), BusError> {
    let src = ctx.regs.d(ops.src) as u16 as i16;
    let dst = ctx.regs.a(ops.dst) as u16 as i16;
    let result = i32::from(dst) - i32::from(src);
    ctx.regs.set_a(ops.dst, u32::from(result as u16));
    let ccr = &mut ctx.regs.ccr;
    match result.cmp(&0) {
        Ordering::Equal => ccr.set_from(true, false, false, false),
        Ordering::Less => ccr.set_from(false, true, true, true),
        Ordering::Greater => ccr.set_from(false, false, false, false),
    }
    Ok(())
}

/// CMP.B D5,A2: unsigned compare of the low bytes, flags only.
pub fn cmp_byte(ctx: &mut Context<'_>, _ops: Operands) -> Result<(), BusError> {
    let lhs = ctx.regs.d(5) as u8;
    let rhs = ctx.regs.a(2) as u8;
    let ccr = &mut ctx.regs.ccr;
    match lhs.cmp(&rhs) {
        Ordering::Less => ccr.set_from(false, true, true, false),
        Ordering::Greater => ccr.set_from(false, false, true, false),
        Ordering::Equal => ccr.set_from(true, false, false, false),
    }
    Ok(())
}

/// JMP (A6)
pub fn jmp(ctx: &mut Context<'_>, _ops: Operands) -> Result<(), BusError> {
    let target = ctx.regs.a(6);
    ctx.regs.set_pc(target);
    Ok(())
}

/// BRA.W: branch by the signed word following the opcode.
///
/// The displacement is relative to the extension word's address, so a
/// displacement of 0 lands just past the opcode.
pub fn bra_word(ctx: &mut Context<'_>, _ops: Operands) -> Result<(), BusError> {
    let base = ctx.regs.pc().wrapping_add(2);
    let disp = ctx.bus.read_word(base)? as i16;
    ctx.regs.set_pc(base.wrapping_add_signed(i32::from(disp)));
    Ok(())
}

/// BLE.S: if Z or N != V, add the opcode's signed low byte to PC.
pub fn ble_byte(ctx: &mut Context<'_>, ops: Operands) -> Result<(), BusError> {
    if ctx.regs.ccr.condition(Condition::Le) {
        ctx.regs.advance_pc(i32::from(ops.disp8));
    }
    Ok(())
}
