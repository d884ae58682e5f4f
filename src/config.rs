//! CPU configuration.

/// What the CPU does with an opcode that is not one of the 151 documented ones.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IllegalOpcodePolicy {
    /// Treat it as a one-byte NOP and log a warning.
    #[default]
    Nop,
    /// Stop the step with `FaultKind::IllegalOpcode`.
    Fault,
}

/// CPU configuration. `Default` gives the compatibility behaviour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Handling of undocumented opcodes. Defaults to `Nop`.
    pub illegal_opcodes: IllegalOpcodePolicy,
    /// Zero each stack byte as it is pulled. Defaults to false.
    pub clear_pulled_stack: bool,
}
