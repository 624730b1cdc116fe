/// Errors returned by the target locator.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("reference mask has no foreground pixels ({width}x{height})")]
    EmptyReference { width: u32, height: u32 },

    #[error(
        "reference mask {template_width}x{template_height} does not fit in candidate mask {mask_width}x{mask_height}"
    )]
    ReferenceTooLarge {
        template_width: u32,
        template_height: u32,
        mask_width: u32,
        mask_height: u32,
    },
}
