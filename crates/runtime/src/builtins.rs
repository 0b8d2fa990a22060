//! Builtin catalog
//!
//! Every native word is one row of [`CATALOG`]: its name, stack effect,
//! description and the procedure that implements it. A builtin's [`OpCode`]
//! is its row index, so the table order is part of the interpreter's
//! identity (`__manual_list` and `compare` on builtins both observe it).
//!
//! The recursion combinators that rebuild themselves as data (`treerec`,
//! `genrec`, `treegenrec`) leave anonymous procedures inside the closures
//! they construct. Those live in a separate table indexed by [`AnonId`] and
//! are never entered in the symbol table.
//!
//! [`OpCode`]: joy_core::OpCode

use crate::interp::Interp;
use crate::{
    aggregate, arithmetic, compare, cond, diagnostics, file, float_ops, io, list_ops, os,
    quotations, recursion, stack, string_ops, symbols, time_ops, types,
};
use joy_core::{AnonId, Result};

/// One native word.
pub struct Builtin {
    pub name: &'static str,
    /// Stack effect in the manual's notation, e.g. `X Y -> Y X`.
    pub effect: &'static str,
    pub doc: &'static str,
    pub run: fn(&mut Interp) -> Result<()>,
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("effect", &self.effect)
            .finish()
    }
}

/// Anonymous step of `treerec`.
pub const TREEREC_STEP: AnonId = AnonId(0);
/// Anonymous step of `genrec`.
pub const GENREC_STEP: AnonId = AnonId(1);
/// Anonymous step of `treegenrec`.
pub const TREEGENREC_STEP: AnonId = AnonId(2);

static ANON: &[Builtin] = &[
    Builtin {
        name: "treerec",
        effect: "T [[O] C] ->",
        doc: "Continues a treerec over T with the closure [[O] C].",
        run: recursion::treerec_step,
    },
    Builtin {
        name: "genrec",
        effect: "[[B] [T] [R1] R2] ->",
        doc: "Continues a genrec with the closure [[B] [T] [R1] R2].",
        run: recursion::genrec_step,
    },
    Builtin {
        name: "treegenrec",
        effect: "T [[O1] [O2] C] ->",
        doc: "Continues a treegenrec over T with the closure [[O1] [O2] C].",
        run: recursion::treegenrec_step,
    },
];

/// Look up an anonymous procedure.
pub fn anon(id: AnonId) -> Option<&'static Builtin> {
    ANON.get(id.0 as usize)
}

/// Find a builtin by name.
pub fn by_name(name: &str) -> Option<&'static Builtin> {
    CATALOG.iter().find(|b| b.name == name)
}

pub static CATALOG: &[Builtin] = &[
    Builtin {
        name: "false",
        effect: "-> false",
        doc: "Pushes the value false.",
        run: diagnostics::push_false,
    },
    Builtin {
        name: "true",
        effect: "-> true",
        doc: "Pushes the value true.",
        run: diagnostics::push_true,
    },
    Builtin {
        name: "maxint",
        effect: "-> maxint",
        doc: "Pushes the largest integer, 2^63 - 1.",
        run: diagnostics::maxint,
    },
    Builtin {
        name: "setsize",
        effect: "-> setsize",
        doc: "Pushes the maximum number of elements in a set.\nIt is 64, and set members are in the range 0..63.",
        run: diagnostics::setsize,
    },
    Builtin {
        name: "stack",
        effect: ".. X Y Z -> .. X Y Z [Z Y X ..]",
        doc: "Pushes the stack as a list.",
        run: stack::stack,
    },
    Builtin {
        name: "__symtabmax",
        effect: "-> I",
        doc: "Pushes value of maximum size of the symbol table.",
        run: symbols::symtabmax,
    },
    Builtin {
        name: "__symtabindex",
        effect: "-> I",
        doc: "Pushes current size of the symbol table.",
        run: symbols::symtabindex,
    },
    Builtin {
        name: "__dump",
        effect: "-> [..]",
        doc: "debugging only: pushes the dump as a list.",
        run: diagnostics::dump,
    },
    Builtin {
        name: "conts",
        effect: "-> [[P] [Q] ..]",
        doc: "Pushes the pending continuations of the running program, innermost first.",
        run: diagnostics::conts,
    },
    Builtin {
        name: "autoput",
        effect: "-> I",
        doc: "Pushes current value of flag  for automatic output, I = 0..2.",
        run: diagnostics::autoput,
    },
    Builtin {
        name: "undeferror",
        effect: "-> I",
        doc: "Pushes current value of undefined-is-error flag.",
        run: diagnostics::undeferror,
    },
    Builtin {
        name: "undefs",
        effect: "-> [..]",
        doc: "Push a list of all undefined symbols in the current symbol table.",
        run: symbols::undefs,
    },
    Builtin {
        name: "echo",
        effect: "-> I",
        doc: "Pushes value of echo flag, I = 0..3.",
        run: diagnostics::echo,
    },
    Builtin {
        name: "clock",
        effect: "-> I",
        doc: "Pushes the integer value of current CPU usage in milliseconds.",
        run: time_ops::clock,
    },
    Builtin {
        name: "time",
        effect: "-> I",
        doc: "Pushes the current time (in seconds since the Epoch).",
        run: time_ops::time,
    },
    Builtin {
        name: "rand",
        effect: "-> I",
        doc: "I is a random integer.",
        run: diagnostics::rand,
    },
    Builtin {
        name: "__memorymax",
        effect: "-> I",
        doc: "Pushes value of total size of memory.",
        run: diagnostics::memorymax,
    },
    Builtin {
        name: "stdin",
        effect: "-> S",
        doc: "Pushes the standard input stream.",
        run: file::stdin,
    },
    Builtin {
        name: "stdout",
        effect: "-> S",
        doc: "Pushes the standard output stream.",
        run: file::stdout,
    },
    Builtin {
        name: "stderr",
        effect: "-> S",
        doc: "Pushes the standard error stream.",
        run: file::stderr,
    },
    Builtin {
        name: "id",
        effect: "->",
        doc: "Identity function, does nothing.\nAny program of the form  P id Q  is equivalent to just  P Q.",
        run: stack::id,
    },
    Builtin {
        name: "dup",
        effect: "X -> X X",
        doc: "Pushes an extra copy of X onto stack.",
        run: stack::dup,
    },
    Builtin {
        name: "swap",
        effect: "X Y -> Y X",
        doc: "Interchanges X and Y on top of the stack.",
        run: stack::swap,
    },
    Builtin {
        name: "rollup",
        effect: "X Y Z -> Z X Y",
        doc: "Moves X and Y up, moves Z down",
        run: stack::rollup,
    },
    Builtin {
        name: "rolldown",
        effect: "X Y Z -> Y Z X",
        doc: "Moves Y and Z down, moves X up",
        run: stack::rolldown,
    },
    Builtin {
        name: "rotate",
        effect: "X Y Z -> Z Y X",
        doc: "Interchanges X and Z",
        run: stack::rotate,
    },
    Builtin {
        name: "popd",
        effect: "Y Z -> Z",
        doc: "As if defined by:   popd  ==  [pop] dip ",
        run: stack::popd,
    },
    Builtin {
        name: "dupd",
        effect: "Y Z -> Y Y Z",
        doc: "As if defined by:   dupd  ==  [dup] dip",
        run: stack::dupd,
    },
    Builtin {
        name: "swapd",
        effect: "X Y Z -> Y X Z",
        doc: "As if defined by:   swapd  ==  [swap] dip",
        run: stack::swapd,
    },
    Builtin {
        name: "rollupd",
        effect: "X Y Z W -> Z X Y W",
        doc: "As if defined by:   rollupd  ==  [rollup] dip",
        run: stack::rollupd,
    },
    Builtin {
        name: "rolldownd",
        effect: "X Y Z W -> Y Z X W",
        doc: "As if defined by:   rolldownd  ==  [rolldown] dip ",
        run: stack::rolldownd,
    },
    Builtin {
        name: "rotated",
        effect: "X Y Z W -> Z Y X W",
        doc: "As if defined by:   rotated  ==  [rotate] dip",
        run: stack::rotated,
    },
    Builtin {
        name: "pop",
        effect: "X ->",
        doc: "Removes X from top of the stack.",
        run: stack::pop,
    },
    Builtin {
        name: "choice",
        effect: "B T F -> X",
        doc: "If B is true, then X = T else X = F.",
        run: stack::choice,
    },
    Builtin {
        name: "or",
        effect: "X Y -> Z",
        doc: "Z is the union of sets X and Y, logical disjunction for truth values.",
        run: arithmetic::or,
    },
    Builtin {
        name: "xor",
        effect: "X Y -> Z",
        doc: "Z is the symmetric difference of sets X and Y,\nlogical exclusive disjunction for truth values.",
        run: arithmetic::xor,
    },
    Builtin {
        name: "and",
        effect: "X Y -> Z",
        doc: "Z is the intersection of sets X and Y, logical conjunction for truth values.",
        run: arithmetic::and,
    },
    Builtin {
        name: "not",
        effect: "X -> Y",
        doc: "Y is the complement of set X, logical negation for truth values.",
        run: arithmetic::not,
    },
    Builtin {
        name: "+",
        effect: "M I -> N",
        doc: "Numeric N is the result of adding integer I to numeric M.\nAlso supports float.",
        run: arithmetic::plus,
    },
    Builtin {
        name: "-",
        effect: "M I -> N",
        doc: "Numeric N is the result of subtracting integer I from numeric M.\nAlso supports float.",
        run: arithmetic::minus,
    },
    Builtin {
        name: "*",
        effect: "I J -> K",
        doc: "Integer K is the product of integers I and J.  Also supports float.",
        run: arithmetic::mul,
    },
    Builtin {
        name: "/",
        effect: "I J -> K",
        doc: "Integer K is the (rounded) ratio of integers I and J.  Also supports float.",
        run: arithmetic::divide,
    },
    Builtin {
        name: "rem",
        effect: "I J -> K",
        doc: "Integer K is the remainder of dividing I by J.  Also supports float.",
        run: arithmetic::rem,
    },
    Builtin {
        name: "div",
        effect: "I J -> K L",
        doc: "Integers K and L are the quotient and remainder of dividing I by J.",
        run: arithmetic::div,
    },
    Builtin {
        name: "sign",
        effect: "N1 -> N2",
        doc: "Integer N2 is the sign (-1 or 0 or +1) of integer N1,\nor float N2 is the sign (-1.0 or 0.0 or 1.0) of float N1.",
        run: arithmetic::sign,
    },
    Builtin {
        name: "neg",
        effect: "I -> J",
        doc: "Integer J is the negative of integer I.  Also supports float.",
        run: arithmetic::neg,
    },
    Builtin {
        name: "ord",
        effect: "C -> I",
        doc: "Integer I is the Ascii value of character C (or logical or integer).",
        run: arithmetic::ord,
    },
    Builtin {
        name: "chr",
        effect: "I -> C",
        doc: "C is the character whose Ascii value is integer I (or logical or character).",
        run: arithmetic::chr,
    },
    Builtin {
        name: "abs",
        effect: "N1 -> N2",
        doc: "Integer N2 is the absolute value (0,1,2..) of integer N1,\nor float N2 is the absolute value (0.0 ..) of float N1",
        run: arithmetic::abs,
    },
    Builtin {
        name: "acos",
        effect: "F -> G",
        doc: "G is the arc cosine of F.",
        run: float_ops::acos,
    },
    Builtin {
        name: "asin",
        effect: "F -> G",
        doc: "G is the arc sine of F.",
        run: float_ops::asin,
    },
    Builtin {
        name: "atan",
        effect: "F -> G",
        doc: "G is the arc tangent of F.",
        run: float_ops::atan,
    },
    Builtin {
        name: "atan2",
        effect: "F G -> H",
        doc: "H is the arc tangent of F / G.",
        run: float_ops::atan2,
    },
    Builtin {
        name: "ceil",
        effect: "F -> G",
        doc: "G is the float ceiling of F.",
        run: float_ops::ceil,
    },
    Builtin {
        name: "cos",
        effect: "F -> G",
        doc: "G is the cosine of F.",
        run: float_ops::cos,
    },
    Builtin {
        name: "cosh",
        effect: "F -> G",
        doc: "G is the hyperbolic cosine of F.",
        run: float_ops::cosh,
    },
    Builtin {
        name: "exp",
        effect: "F -> G",
        doc: "G is e (2.718281828...) raised to the Fth power.",
        run: float_ops::exp,
    },
    Builtin {
        name: "floor",
        effect: "F -> G",
        doc: "G is the floor of F.",
        run: float_ops::floor,
    },
    Builtin {
        name: "frexp",
        effect: "F -> G I",
        doc: "G is the mantissa and I is the exponent of F.\nUnless F = 0, 0.5 <= abs(G) < 1.0.",
        run: float_ops::frexp,
    },
    Builtin {
        name: "ldexp",
        effect: "F I -> G",
        doc: "G is F times 2 to the Ith power.",
        run: float_ops::ldexp,
    },
    Builtin {
        name: "log",
        effect: "F -> G",
        doc: "G is the natural logarithm of F.",
        run: float_ops::log,
    },
    Builtin {
        name: "log10",
        effect: "F -> G",
        doc: "G is the common logarithm of F.",
        run: float_ops::log10,
    },
    Builtin {
        name: "modf",
        effect: "F -> G H",
        doc: "G is the fractional part and H is the integer part\n(but expressed as a float) of F.",
        run: float_ops::modf,
    },
    Builtin {
        name: "pow",
        effect: "F G -> H",
        doc: "H is F raised to the Gth power.",
        run: float_ops::pow,
    },
    Builtin {
        name: "sin",
        effect: "F -> G",
        doc: "G is the sine of F.",
        run: float_ops::sin,
    },
    Builtin {
        name: "sinh",
        effect: "F -> G",
        doc: "G is the hyperbolic sine of F.",
        run: float_ops::sinh,
    },
    Builtin {
        name: "sqrt",
        effect: "F -> G",
        doc: "G is the square root of F.",
        run: float_ops::sqrt,
    },
    Builtin {
        name: "tan",
        effect: "F -> G",
        doc: "G is the tangent of F.",
        run: float_ops::tan,
    },
    Builtin {
        name: "tanh",
        effect: "F -> G",
        doc: "G is the hyperbolic tangent of F.",
        run: float_ops::tanh,
    },
    Builtin {
        name: "trunc",
        effect: "F -> I",
        doc: "I is an integer equal to the float F truncated toward zero.",
        run: float_ops::trunc,
    },
    Builtin {
        name: "localtime",
        effect: "I -> T",
        doc: "Converts a time I into a list T representing local time:\n[year month day hour minute second isdst yearday weekday].\nMonth is 1 = January ... 12 = December;\nisdst is a Boolean flagging daylight savings/summer time;\nweekday is 1 = Monday ... 7 = Sunday.",
        run: time_ops::localtime,
    },
    Builtin {
        name: "gmtime",
        effect: "I -> T",
        doc: "Converts a time I into a list T representing universal time:\n[year month day hour minute second isdst yearday weekday].\nMonth is 1 = January ... 12 = December;\nisdst is false; weekday is 1 = Monday ... 7 = Sunday.",
        run: time_ops::gmtime,
    },
    Builtin {
        name: "mktime",
        effect: "T -> I",
        doc: "Converts a list T representing local time into a time I.\nT is in the format generated by localtime.",
        run: time_ops::mktime,
    },
    Builtin {
        name: "strftime",
        effect: "T S1 -> S2",
        doc: "Formats a list T in the format of localtime or gmtime\nusing string S1 and pushes the result S2.",
        run: time_ops::strftime,
    },
    Builtin {
        name: "strtol",
        effect: "S I -> J",
        doc: "String S is converted to the integer J using base I.\nIf I = 0, assumes base 10,\nbut leading \"0\" means base 8 and leading \"0x\" means base 16.",
        run: string_ops::strtol,
    },
    Builtin {
        name: "strtod",
        effect: "S -> R",
        doc: "String S is converted to the float R.",
        run: string_ops::strtod,
    },
    Builtin {
        name: "format",
        effect: "N C I J -> S",
        doc: "S is the formatted version of N in mode C\n('d or 'i = decimal, 'o = octal, 'x or\n'X = hex with lower or upper case letters)\nwith maximum width I and minimum width J.",
        run: string_ops::format,
    },
    Builtin {
        name: "formatf",
        effect: "F C I J -> S",
        doc: "S is the formatted version of F in mode C\n('e or 'E = exponential, 'f = fractional,\n'g or G = general with lower or upper case letters)\nwith maximum width I and precision J.",
        run: string_ops::formatf,
    },
    Builtin {
        name: "srand",
        effect: "I ->",
        doc: "Sets the random integer seed to integer I.",
        run: diagnostics::srand,
    },
    Builtin {
        name: "pred",
        effect: "M -> N",
        doc: "Numeric N is the predecessor of numeric M.",
        run: arithmetic::pred,
    },
    Builtin {
        name: "succ",
        effect: "M -> N",
        doc: "Numeric N is the successor of numeric M.",
        run: arithmetic::succ,
    },
    Builtin {
        name: "max",
        effect: "N1 N2 -> N",
        doc: "N is the maximum of numeric values N1 and N2.  Also supports float.",
        run: arithmetic::max,
    },
    Builtin {
        name: "min",
        effect: "N1 N2 -> N",
        doc: "N is the minimum of numeric values N1 and N2.  Also supports float.",
        run: arithmetic::min,
    },
    Builtin {
        name: "fclose",
        effect: "S ->",
        doc: "Stream S is closed and removed from the stack.",
        run: file::fclose,
    },
    Builtin {
        name: "feof",
        effect: "S -> S B",
        doc: "B is the end-of-file status of stream S.",
        run: file::feof,
    },
    Builtin {
        name: "ferror",
        effect: "S -> S B",
        doc: "B is the error status of stream S.",
        run: file::ferror,
    },
    Builtin {
        name: "fflush",
        effect: "S -> S",
        doc: "Flush stream S, forcing all buffered output to be written.",
        run: file::fflush,
    },
    Builtin {
        name: "fget",
        effect: "S -> S F",
        doc: "Reads a factor from stream S and pushes it onto stack.",
        run: io::fget,
    },
    Builtin {
        name: "fgetch",
        effect: "S -> S C",
        doc: "C is the next available character from stream S.",
        run: file::fgetch,
    },
    Builtin {
        name: "fgets",
        effect: "S -> S L",
        doc: "L is the next available line (as a string) from stream S.",
        run: file::fgets,
    },
    Builtin {
        name: "fopen",
        effect: "P M -> S",
        doc: "The file system object with pathname P is opened with mode M (r, w, a, etc.)\nand stream object S is pushed; if the open fails, file:NULL is pushed.",
        run: file::fopen,
    },
    Builtin {
        name: "fread",
        effect: "S I -> S L",
        doc: "I bytes are read from the current position of stream S\nand returned as a list of I integers.",
        run: file::fread,
    },
    Builtin {
        name: "fwrite",
        effect: "S L -> S",
        doc: "A list of integers are written as bytes to the current position of stream S.",
        run: file::fwrite,
    },
    Builtin {
        name: "fremove",
        effect: "P -> B",
        doc: "The file system object with pathname P is removed from the file system.\nB is a boolean indicating success or failure.",
        run: file::fremove,
    },
    Builtin {
        name: "frename",
        effect: "P1 P2 -> B",
        doc: "The file system object with pathname P1 is renamed to P2.\nB is a boolean indicating success or failure.",
        run: file::frename,
    },
    Builtin {
        name: "fput",
        effect: "S X -> S",
        doc: "Writes X to stream S, pops X off stack.",
        run: file::fput,
    },
    Builtin {
        name: "fputch",
        effect: "S C -> S",
        doc: "The character C is written to the current position of stream S.",
        run: file::fputch,
    },
    Builtin {
        name: "fputchars",
        effect: "S \"abc..\" -> S",
        doc: "The string abc.. (no quotes) is written to the current position of stream S.",
        run: file::fputchars,
    },
    Builtin {
        name: "fputstring",
        effect: "S \"abc..\" -> S",
        doc: "== fputchars, as a temporary alternative.",
        run: file::fputchars,
    },
    Builtin {
        name: "fseek",
        effect: "S P W -> S B",
        doc: "Stream S is repositioned to position P relative to whence-point W,\nwhere W = 0, 1, 2 for beginning, current position, end respectively.",
        run: file::fseek,
    },
    Builtin {
        name: "ftell",
        effect: "S -> S I",
        doc: "I is the current position of stream S.",
        run: file::ftell,
    },
    Builtin {
        name: "unstack",
        effect: "[X Y ..] -> ..Y X",
        doc: "The list [X Y ..] becomes the new stack.",
        run: stack::unstack,
    },
    Builtin {
        name: "cons",
        effect: "X A -> B",
        doc: "Aggregate B is A with a new member X (first member for sequences).",
        run: aggregate::cons,
    },
    Builtin {
        name: "swons",
        effect: "A X -> B",
        doc: "Aggregate B is A with a new member X (first member for sequences).",
        run: aggregate::swons,
    },
    Builtin {
        name: "first",
        effect: "A -> F",
        doc: "F is the first member of the non-empty aggregate A.",
        run: aggregate::first,
    },
    Builtin {
        name: "rest",
        effect: "A -> R",
        doc: "R is the non-empty aggregate A with its first member removed.",
        run: aggregate::rest,
    },
    Builtin {
        name: "compare",
        effect: "A B -> I",
        doc: "I (=-1,0,+1) is the comparison of aggregates A and B.\nThe values correspond to the predicates <, =, >.",
        run: compare::compare,
    },
    Builtin {
        name: "at",
        effect: "A I -> X",
        doc: "X (= A[I]) is the member of A at position I.",
        run: aggregate::at,
    },
    Builtin {
        name: "of",
        effect: "I A -> X",
        doc: "X (= A[I]) is the I-th member of aggregate A.",
        run: aggregate::of,
    },
    Builtin {
        name: "size",
        effect: "A -> I",
        doc: "Integer I is the number of elements of aggregate A.",
        run: aggregate::size,
    },
    Builtin {
        name: "opcase",
        effect: "X [..[X Xs]..] -> [Xs]",
        doc: "Indexing on type of X, returns the list [Xs].",
        run: aggregate::opcase,
    },
    Builtin {
        name: "case",
        effect: "X [..[X Y]..] -> [Y] i",
        doc: "Indexing on the value of X, execute the matching Y.",
        run: cond::case,
    },
    Builtin {
        name: "uncons",
        effect: "A -> F R",
        doc: "F and R are the first and the rest of non-empty aggregate A.",
        run: aggregate::uncons,
    },
    Builtin {
        name: "unswons",
        effect: "A -> R F",
        doc: "R and F are the rest and the first of non-empty aggregate A.",
        run: aggregate::unswons,
    },
    Builtin {
        name: "drop",
        effect: "A N -> B",
        doc: "Aggregate B is the result of deleting the first N elements of A.",
        run: aggregate::drop,
    },
    Builtin {
        name: "take",
        effect: "A N -> B",
        doc: "Aggregate B is the result of retaining just the first N elements of A.",
        run: aggregate::take,
    },
    Builtin {
        name: "concat",
        effect: "S T -> U",
        doc: "Sequence U is the concatenation of sequences S and T.",
        run: aggregate::concat,
    },
    Builtin {
        name: "enconcat",
        effect: "X S T -> U",
        doc: "Sequence U is the concatenation of sequences S and T\nwith X inserted between S and T (== swapd cons concat)",
        run: aggregate::enconcat,
    },
    Builtin {
        name: "name",
        effect: "sym -> \"sym\"",
        doc: "For operators and combinators, the string \"sym\" is the name of item sym,\nfor literals sym the result string is its type.",
        run: symbols::name,
    },
    Builtin {
        name: "intern",
        effect: "\"sym\" -> sym",
        doc: "Pushes the item whose name is \"sym\".",
        run: symbols::intern,
    },
    Builtin {
        name: "body",
        effect: "U -> [P]",
        doc: "Quotation [P] is the body of user-defined symbol U.",
        run: symbols::body,
    },
    Builtin {
        name: "null",
        effect: "X -> B",
        doc: "Tests for empty aggregate X or zero numeric.",
        run: types::null,
    },
    Builtin {
        name: "small",
        effect: "X -> B",
        doc: "Tests whether aggregate X has 0 or 1 members, or numeric 0 or 1.",
        run: types::small,
    },
    Builtin {
        name: ">=",
        effect: "X Y -> B",
        doc: "Either both X and Y are numeric or both are strings or symbols.\nTests whether X greater than or equal to Y.  Also supports float.",
        run: compare::geql,
    },
    Builtin {
        name: ">",
        effect: "X Y -> B",
        doc: "Either both X and Y are numeric or both are strings or symbols.\nTests whether X greater than Y.  Also supports float.",
        run: compare::greater,
    },
    Builtin {
        name: "<=",
        effect: "X Y -> B",
        doc: "Either both X and Y are numeric or both are strings or symbols.\nTests whether X less than or equal to Y.  Also supports float.",
        run: compare::leql,
    },
    Builtin {
        name: "<",
        effect: "X Y -> B",
        doc: "Either both X and Y are numeric or both are strings or symbols.\nTests whether X less than Y.  Also supports float.",
        run: compare::less,
    },
    Builtin {
        name: "!=",
        effect: "X Y -> B",
        doc: "Either both X and Y are numeric or both are strings or symbols.\nTests whether X not equal to Y.  Also supports float.",
        run: compare::neql,
    },
    Builtin {
        name: "=",
        effect: "X Y -> B",
        doc: "Either both X and Y are numeric or both are strings or symbols.\nTests whether X equal to Y.  Also supports float.",
        run: compare::eql,
    },
    Builtin {
        name: "equal",
        effect: "T U -> B",
        doc: "(Recursively) tests whether trees T and U are identical.",
        run: compare::equal,
    },
    Builtin {
        name: "has",
        effect: "A X -> B",
        doc: "Tests whether aggregate A has X as a member.",
        run: compare::has,
    },
    Builtin {
        name: "in",
        effect: "X A -> B",
        doc: "Tests whether X is a member of aggregate A.",
        run: compare::in_,
    },
    Builtin {
        name: "sametype",
        effect: "X Y -> B",
        doc: "Tests whether X and Y have the same type.",
        run: compare::sametype,
    },
    Builtin {
        name: "integer",
        effect: "X -> B",
        doc: "Tests whether X is an integer.",
        run: types::is_integer,
    },
    Builtin {
        name: "char",
        effect: "X -> B",
        doc: "Tests whether X is a character.",
        run: types::is_char,
    },
    Builtin {
        name: "logical",
        effect: "X -> B",
        doc: "Tests whether X is a logical.",
        run: types::is_logical,
    },
    Builtin {
        name: "set",
        effect: "X -> B",
        doc: "Tests whether X is a set.",
        run: types::is_set,
    },
    Builtin {
        name: "string",
        effect: "X -> B",
        doc: "Tests whether X is a string.",
        run: types::is_string,
    },
    Builtin {
        name: "list",
        effect: "X -> B",
        doc: "Tests whether X is a list.",
        run: types::is_list,
    },
    Builtin {
        name: "leaf",
        effect: "X -> B",
        doc: "Tests whether X is not a list.",
        run: types::is_leaf,
    },
    Builtin {
        name: "user",
        effect: "X -> B",
        doc: "Tests whether X is a user-defined symbol.",
        run: types::is_user,
    },
    Builtin {
        name: "float",
        effect: "R -> B",
        doc: "Tests whether R is a float.",
        run: types::is_float,
    },
    Builtin {
        name: "file",
        effect: "F -> B",
        doc: "Tests whether F is a file.",
        run: types::is_file,
    },
    Builtin {
        name: "i",
        effect: "[P] -> ...",
        doc: "Executes P. So, [P] i  ==  P.",
        run: quotations::i,
    },
    Builtin {
        name: "x",
        effect: "[P]i -> ...",
        doc: "Executes P without popping [P]. So, [P] x  ==  [P] P.",
        run: quotations::x,
    },
    Builtin {
        name: "dip",
        effect: "X [P] -> ... X",
        doc: "Saves X, executes P, pushes X back.",
        run: quotations::dip,
    },
    Builtin {
        name: "app1",
        effect: "X [P] -> R",
        doc: "Executes P, pushes result R on stack.",
        run: quotations::app1,
    },
    Builtin {
        name: "app11",
        effect: "X Y [P] -> R",
        doc: "Executes P, pushes result R on stack.",
        run: quotations::app11,
    },
    Builtin {
        name: "app12",
        effect: "X Y1 Y2 [P] -> R1 R2",
        doc: "Executes P twice, with Y1 and Y2, returns R1 and R2.",
        run: quotations::app12,
    },
    Builtin {
        name: "construct",
        effect: "[P] [[P1] [P2] ..] -> R1 R2 ..",
        doc: "Saves state of stack and then executes [P].\nThen executes each [Pi] to give Ri pushed onto saved stack.",
        run: quotations::construct,
    },
    Builtin {
        name: "nullary",
        effect: "[P] -> R",
        doc: "Executes P, which leaves R on top of the stack.\nNo matter how many parameters this consumes, none are removed from the stack.",
        run: quotations::nullary,
    },
    Builtin {
        name: "unary",
        effect: "X [P] -> R",
        doc: "Executes P, which leaves R on top of the stack.\nNo matter how many parameters this consumes,\nexactly one is removed from the stack.",
        run: quotations::unary,
    },
    Builtin {
        name: "unary2",
        effect: "X1 X2 [P] -> R1 R2",
        doc: "Executes P twice, with X1 and X2 on top of the stack.\nReturns the two values R1 and R2.",
        run: quotations::unary2,
    },
    Builtin {
        name: "unary3",
        effect: "X1 X2 X3 [P] -> R1 R2 R3",
        doc: "Executes P three times, with Xi, returns Ri (i = 1..3).",
        run: quotations::unary3,
    },
    Builtin {
        name: "unary4",
        effect: "X1 X2 X3 X4 [P] -> R1 R2 R3 R4",
        doc: "Executes P four times, with Xi, returns Ri (i = 1..4).",
        run: quotations::unary4,
    },
    Builtin {
        name: "app2",
        effect: "X1 X2 [P] -> R1 R2",
        doc: "Obsolescent.  == unary2",
        run: quotations::unary2,
    },
    Builtin {
        name: "app3",
        effect: "X1 X2 X3 [P] -> R1 R2 R3",
        doc: "Obsolescent.  == unary3",
        run: quotations::unary3,
    },
    Builtin {
        name: "app4",
        effect: "X1 X2 X3 X4 [P] -> R1 R2 R3 R4",
        doc: "Obsolescent.  == unary4",
        run: quotations::unary4,
    },
    Builtin {
        name: "binary",
        effect: "X Y [P] -> R",
        doc: "Executes P, which leaves R on top of the stack.\nNo matter how many parameters this consumes,\nexactly two are removed from the stack.",
        run: quotations::binary,
    },
    Builtin {
        name: "ternary",
        effect: "X Y Z [P] -> R",
        doc: "Executes P, which leaves R on top of the stack.\nNo matter how many parameters this consumes,\nexactly three are removed from the stack.",
        run: quotations::ternary,
    },
    Builtin {
        name: "cleave",
        effect: "X [P1] [P2] -> R1 R2",
        doc: "Executes P1 and P2, each with X on top, producing two results.",
        run: quotations::cleave,
    },
    Builtin {
        name: "branch",
        effect: "B [T] [F] -> ...",
        doc: "If B is true, then executes T else executes F.",
        run: cond::branch,
    },
    Builtin {
        name: "ifte",
        effect: "[B] [T] [F] -> ...",
        doc: "Executes B. If that yields true, then executes T else executes F.",
        run: cond::ifte,
    },
    Builtin {
        name: "ifinteger",
        effect: "X [T] [E] -> ...",
        doc: "If X is an integer, executes T else executes E.",
        run: cond::ifinteger,
    },
    Builtin {
        name: "ifchar",
        effect: "X [T] [E] -> ...",
        doc: "If X is a character, executes T else executes E.",
        run: cond::ifchar,
    },
    Builtin {
        name: "iflogical",
        effect: "X [T] [E] -> ...",
        doc: "If X is a logical or truth value, executes T else executes E.",
        run: cond::iflogical,
    },
    Builtin {
        name: "ifset",
        effect: "X [T] [E] -> ...",
        doc: "If X is a set, executes T else executes E.",
        run: cond::ifset,
    },
    Builtin {
        name: "ifstring",
        effect: "X [T] [E] -> ...",
        doc: "If X is a string, executes T else executes E.",
        run: cond::ifstring,
    },
    Builtin {
        name: "iflist",
        effect: "X [T] [E] -> ...",
        doc: "If X is a list, executes T else executes E.",
        run: cond::iflist,
    },
    Builtin {
        name: "iffloat",
        effect: "X [T] [E] -> ...",
        doc: "If X is a float, executes T else executes E.",
        run: cond::iffloat,
    },
    Builtin {
        name: "iffile",
        effect: "X [T] [E] -> ...",
        doc: "If X is a file, executes T else executes E.",
        run: cond::iffile,
    },
    Builtin {
        name: "cond",
        effect: "[..[[Bi] Ti]..[D]] -> ...",
        doc: "Tries each Bi. If that yields true, then executes Ti and exits.\nIf no Bi yields true, executes default D.",
        run: cond::cond,
    },
    Builtin {
        name: "while",
        effect: "[B] [D] -> ...",
        doc: "While executing B yields true executes D.",
        run: cond::while_,
    },
    Builtin {
        name: "linrec",
        effect: "[P] [T] [R1] [R2] -> ...",
        doc: "Executes P. If that yields true, executes T.\nElse executes R1, recurses, executes R2.",
        run: recursion::linrec,
    },
    Builtin {
        name: "tailrec",
        effect: "[P] [T] [R1] -> ...",
        doc: "Executes P. If that yields true, executes T.\nElse executes R1, recurses.",
        run: recursion::tailrec,
    },
    Builtin {
        name: "binrec",
        effect: "[P] [T] [R1] [R2] -> ...",
        doc: "Executes P. If that yields true, executes T.\nElse uses R1 to produce two intermediates, recurses on both,\nthen executes R2 to combines their results.",
        run: recursion::binrec,
    },
    Builtin {
        name: "genrec",
        effect: "[B] [T] [R1] [R2] -> ...",
        doc: "Executes B, if that yields true executes T.\nElse executes R1 and then [[[B] [T] [R1] R2] genrec] R2.",
        run: recursion::genrec,
    },
    Builtin {
        name: "condnestrec",
        effect: "[ [C1] [C2] .. [D] ] -> ...",
        doc: "A generalisation of condlinrec.\nEach [Ci] is of the form [[B] [R1] [R2] .. [Rn]] and [D] is of the form\n[[R1] [R2] .. [Rn]]. Tries each B, or if all fail, takes the default [D].\nFor the case taken, executes each [Ri] but recurses between any two\nconsecutive [Ri]. (n > 3 would be exceptional.)",
        run: recursion::condnestrec,
    },
    Builtin {
        name: "condlinrec",
        effect: "[ [C1] [C2] .. [D] ] -> ...",
        doc: "Each [Ci] is of the forms [[B] [T]] or [[B] [R1] [R2]].\nTries each B. If that yields true and there is just a [T], executes T and exit.\nIf there are [R1] and [R2], executes R1, recurses, executes R2.\nSubsequent cases are ignored. If no B yields true, then [D] is used.\nIt is then of the forms [[T]] or [[R1] [R2]]. For the former, executes T.\nFor the latter executes R1, recurses, executes R2.",
        run: recursion::condlinrec,
    },
    Builtin {
        name: "step",
        effect: "A [P] -> ...",
        doc: "Sequentially putting members of aggregate A onto stack,\nexecutes P for each member of A.",
        run: list_ops::step,
    },
    Builtin {
        name: "fold",
        effect: "A V0 [P] -> V",
        doc: "Starting with value V0, sequentially pushes members of aggregate A\nand combines with binary operator P to produce value V.",
        run: list_ops::fold,
    },
    Builtin {
        name: "map",
        effect: "A [P] -> B",
        doc: "Executes P on each member of aggregate A,\ncollects results in sametype aggregate B.",
        run: list_ops::map,
    },
    Builtin {
        name: "times",
        effect: "N [P] -> ...",
        doc: "N times executes P.",
        run: quotations::times,
    },
    Builtin {
        name: "infra",
        effect: "L1 [P] -> L2",
        doc: "Using list L1 as stack, executes P and returns a new list L2.\nThe first element of L1 is used as the top of stack,\nand after execution of P the top of stack becomes the first element of L2.",
        run: quotations::infra,
    },
    Builtin {
        name: "primrec",
        effect: "X [I] [C] -> R",
        doc: "Executes I to obtain an initial value R0.\nFor integer X uses increasing positive integers to X, combines by C for new R.\nFor aggregate X uses successive members and combines by C for new R.",
        run: recursion::primrec,
    },
    Builtin {
        name: "filter",
        effect: "A [B] -> A1",
        doc: "Uses test B to filter aggregate A producing sametype aggregate A1.",
        run: list_ops::filter,
    },
    Builtin {
        name: "split",
        effect: "A [B] -> A1 A2",
        doc: "Uses test B to split aggregate A into sametype aggregates A1 and A2 .",
        run: list_ops::split,
    },
    Builtin {
        name: "some",
        effect: "A [B] -> X",
        doc: "Applies test B to members of aggregate A, X = true if some pass.",
        run: list_ops::some,
    },
    Builtin {
        name: "all",
        effect: "A [B] -> X",
        doc: "Applies test B to members of aggregate A, X = true if all pass.",
        run: list_ops::all,
    },
    Builtin {
        name: "treestep",
        effect: "T [P] -> ...",
        doc: "Recursively traverses leaves of tree T, executes P for each leaf.",
        run: recursion::treestep,
    },
    Builtin {
        name: "treerec",
        effect: "T [O] [C] -> ...",
        doc: "T is a tree. If T is a leaf, executes O. Else executes [[[O] C] treerec] C.",
        run: recursion::treerec,
    },
    Builtin {
        name: "treegenrec",
        effect: "T [O1] [O2] [C] -> ...",
        doc: "T is a tree. If T is a leaf, executes O1.\nElse executes O2 and then [[[O1] [O2] C] treegenrec] C.",
        run: recursion::treegenrec,
    },
    Builtin {
        name: "__manual_list",
        effect: "-> L",
        doc: "Pushes a list L of lists (one per operator) of three documentation strings",
        run: diagnostics::manual_list,
    },
    Builtin {
        name: "__settracegc",
        effect: "I ->",
        doc: "Sets value of flag for tracing garbage collection to I (= 0..5).",
        run: diagnostics::settracegc,
    },
    Builtin {
        name: "setautoput",
        effect: "I ->",
        doc: "Sets value of flag for automatic put to I (if I = 0, none;\nif I = 1, put; if I = 2, stack).",
        run: diagnostics::setautoput,
    },
    Builtin {
        name: "setundeferror",
        effect: "I ->",
        doc: "Sets flag that controls behavior of undefined functions\n(0 = no error, 1 = error).",
        run: diagnostics::setundeferror,
    },
    Builtin {
        name: "setecho",
        effect: "I ->",
        doc: "Sets value of echo flag for listing.\nI = 0: no echo, 1: echo, 2: with tab, 3: and linenumber.",
        run: diagnostics::setecho,
    },
    Builtin {
        name: "gc",
        effect: "->",
        doc: "Initiates garbage collection.",
        run: diagnostics::gc,
    },
    Builtin {
        name: "system",
        effect: "\"command\" ->",
        doc: "Escapes to shell, executes string \"command\".\nThe string may cause execution of another program.\nWhen that has finished, the process returns to Joy.",
        run: os::system,
    },
    Builtin {
        name: "getenv",
        effect: "\"variable\" -> \"value\"",
        doc: "Retrieves the value of the environment variable \"variable\".",
        run: os::getenv,
    },
    Builtin {
        name: "argv",
        effect: "-> A",
        doc: "Creates an aggregate A containing the interpreter's command line arguments.",
        run: os::argv,
    },
    Builtin {
        name: "argc",
        effect: "-> I",
        doc: "Pushes the number of command line arguments. This is equivalent to 'argv size'.",
        run: os::argc,
    },
    Builtin {
        name: "__memoryindex",
        effect: "->",
        doc: "Pushes current value of memory.",
        run: diagnostics::memoryindex,
    },
    Builtin {
        name: "get",
        effect: "-> F",
        doc: "Reads a factor from input and pushes it onto stack.",
        run: io::get,
    },
    Builtin {
        name: "getch",
        effect: "-> F",
        doc: "Reads a character from input and pushes it onto stack.",
        run: io::getch,
    },
    Builtin {
        name: "put",
        effect: "X ->",
        doc: "Writes X to output, pops X off stack.",
        run: io::put,
    },
    Builtin {
        name: "putch",
        effect: "N ->",
        doc: "N : numeric, writes character whose ASCII is N.",
        run: io::putch,
    },
    Builtin {
        name: "putchars",
        effect: "\"abc..\" ->",
        doc: "Writes  abc.. (without quotes)",
        run: io::putchars,
    },
    Builtin {
        name: "include",
        effect: "\"filnam.ext\" ->",
        doc: "Transfers input to file whose name is \"filnam.ext\".\nOn end-of-file returns to previous input file.",
        run: io::include,
    },
    Builtin {
        name: "abort",
        effect: "->",
        doc: "Aborts execution of current Joy program, returns to Joy main cycle.",
        run: diagnostics::abort,
    },
    Builtin {
        name: "quit",
        effect: "->",
        doc: "Exit from Joy.",
        run: diagnostics::quit,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique() {
        let mut seen = HashSet::new();
        for builtin in CATALOG {
            assert!(seen.insert(builtin.name), "duplicate {}", builtin.name);
        }
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(CATALOG[0].name, "false");
        assert_eq!(CATALOG[CATALOG.len() - 1].name, "quit");
        assert!(by_name("help").is_none());
    }

    #[test]
    fn test_aliases_keep_effects() {
        assert_eq!(by_name("app2").unwrap().effect, by_name("unary2").unwrap().effect);
        assert_eq!(
            by_name("fputstring").unwrap().effect,
            by_name("fputchars").unwrap().effect
        );
    }

    #[test]
    fn test_anon_table() {
        assert_eq!(anon(GENREC_STEP).unwrap().name, "genrec");
        assert!(anon(AnonId(99)).is_none());
    }
}
