//! Limb arithmetic for four-limb Montgomery fields.
//!
//! Every function here is a `const fn` so that field constants can be
//! converted into Montgomery form at compile time.

/// Compute `a + b + carry`, returning the result and the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute `a - (b + borrow)`, returning the result and the new borrow (0 or 1).
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (ret as u64, (ret >> 127) as u64)
}

/// Compute `a + (b * c) + carry`, returning the result and the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Return true if `a < b` as integers.
#[inline]
pub(crate) const fn lt(a: &[u64; 4], b: &[u64; 4]) -> bool {
    let (_, borrow) = sbb(a[0], b[0], 0);
    let (_, borrow) = sbb(a[1], b[1], borrow);
    let (_, borrow) = sbb(a[2], b[2], borrow);
    let (_, borrow) = sbb(a[3], b[3], borrow);
    borrow == 1
}

/// Subtract `m` from `a` when `a >= m`.
#[inline]
pub(crate) const fn sub_if_ge(a: [u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (d0, borrow) = sbb(a[0], m[0], 0);
    let (d1, borrow) = sbb(a[1], m[1], borrow);
    let (d2, borrow) = sbb(a[2], m[2], borrow);
    let (d3, borrow) = sbb(a[3], m[3], borrow);
    let keep = 0u64.wrapping_sub(borrow);
    [
        (a[0] & keep) | (d0 & !keep),
        (a[1] & keep) | (d1 & !keep),
        (a[2] & keep) | (d2 & !keep),
        (a[3] & keep) | (d3 & !keep),
    ]
}

/// Modular addition of two reduced values. The modulus must be below 2^255.
#[inline]
pub(crate) const fn add_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (s0, carry) = adc(a[0], b[0], 0);
    let (s1, carry) = adc(a[1], b[1], carry);
    let (s2, carry) = adc(a[2], b[2], carry);
    let (s3, _) = adc(a[3], b[3], carry);
    sub_if_ge([s0, s1, s2, s3], m)
}

/// Modular subtraction of two reduced values.
#[inline]
pub(crate) const fn sub_mod(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    let (d0, borrow) = sbb(a[0], b[0], 0);
    let (d1, borrow) = sbb(a[1], b[1], borrow);
    let (d2, borrow) = sbb(a[2], b[2], borrow);
    let (d3, borrow) = sbb(a[3], b[3], borrow);

    let mask = 0u64.wrapping_sub(borrow);
    let (d0, carry) = adc(d0, m[0] & mask, 0);
    let (d1, carry) = adc(d1, m[1] & mask, carry);
    let (d2, carry) = adc(d2, m[2] & mask, carry);
    let (d3, _) = adc(d3, m[3] & mask, carry);
    [d0, d1, d2, d3]
}

/// Modular negation of a reduced value.
#[inline]
pub(crate) const fn neg_mod(a: &[u64; 4], m: &[u64; 4]) -> [u64; 4] {
    sub_mod(&[0u64; 4], a, m)
}

/// Schoolbook product of two four-limb integers.
#[inline]
pub(crate) const fn mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    let mut i = 0;
    while i < 4 {
        let mut carry = 0u64;
        let mut j = 0;
        while j < 4 {
            let (v, c) = mac(t[i + j], a[i], b[j], carry);
            t[i + j] = v;
            carry = c;
            j += 1;
        }
        t[i + 4] = carry;
        i += 1;
    }
    t
}

/// Montgomery reduction of an eight-limb integer `t < m * 2^256`, i.e. `t * 2^-256 mod m`.
#[inline]
pub(crate) const fn montgomery_reduce(t: [u64; 8], m: &[u64; 4], inv: u64) -> [u64; 4] {
    let mut t = t;
    let mut carry2 = 0u64;
    let mut i = 0;
    while i < 4 {
        let k = t[i].wrapping_mul(inv);
        let (_, mut carry) = mac(t[i], k, m[0], 0);
        let mut j = 1;
        while j < 4 {
            let (v, c) = mac(t[i + j], k, m[j], carry);
            t[i + j] = v;
            carry = c;
            j += 1;
        }
        let (v, c) = adc(t[i + 4], carry2, carry);
        t[i + 4] = v;
        carry2 = c;
        i += 1;
    }
    sub_if_ge([t[4], t[5], t[6], t[7]], m)
}

/// Montgomery multiplication `a * b * 2^-256 mod m`.
#[inline]
pub(crate) const fn mont_mul(a: &[u64; 4], b: &[u64; 4], m: &[u64; 4], inv: u64) -> [u64; 4] {
    montgomery_reduce(mul_wide(a, b), m, inv)
}
