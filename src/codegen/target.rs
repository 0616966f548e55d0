// Instruction templates for the supported architectures (AT&T syntax, GNU as)

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    X86_64,
    /// 32-bit x86; needs a multilib toolchain (`cc -m32`)
    X86,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::X86_64 => "x86_64",
            Target::X86 => "x86",
        }
    }

    /// Extra flags for the `cc` driver when assembling and linking.
    pub fn assembler_flags(self) -> &'static [&'static str] {
        match self {
            Target::X86_64 => &[],
            Target::X86 => &["-m32"],
        }
    }

    pub(crate) fn prologue(self) -> &'static str {
        match self {
            Target::X86_64 => "    push %rbp\n    mov %rsp, %rbp\n",
            Target::X86 => "    pushl %ebp\n    movl %esp, %ebp\n",
        }
    }

    pub(crate) fn epilogue(self) -> &'static str {
        match self {
            Target::X86_64 => "    mov %rbp, %rsp\n    pop %rbp\n    ret\n",
            Target::X86 => "    movl %ebp, %esp\n    popl %ebp\n    ret\n",
        }
    }

    /// Pop the evaluation stack into the return register.
    pub(crate) fn pop_return(self) -> &'static str {
        match self {
            Target::X86_64 => "    pop %rax\n",
            Target::X86 => "    popl %eax\n",
        }
    }

    /// Push an immediate, or `None` when the value is too wide.
    pub(crate) fn push_constant(self, value: u64) -> Option<String> {
        match self {
            // `push imm32` sign-extends, so wider values go through %rax
            Target::X86_64 if value <= i32::MAX as u64 => Some(format!("    push ${}\n", value)),
            Target::X86_64 => Some(format!("    movabs ${}, %rax\n    push %rax\n", value)),
            Target::X86 if value <= u32::MAX as u64 => Some(format!("    pushl ${}\n", value)),
            Target::X86 => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A target name that is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTarget(pub String);

impl fmt::Display for UnknownTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown target '{}' (expected x86_64 or x86)", self.0)
    }
}

impl std::error::Error for UnknownTarget {}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" | "x86-64" | "amd64" => Ok(Target::X86_64),
            "x86" | "i386" | "i686" => Ok(Target::X86),
            other => Err(UnknownTarget(other.to_string())),
        }
    }
}
