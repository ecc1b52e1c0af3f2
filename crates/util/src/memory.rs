use ash::vk;

/// Finds the first memory type allowed by `type_bits` (as reported in
/// `vk::MemoryRequirements::memory_type_bits`) whose property flags contain
/// every flag in `requirements`.
pub fn memory_type_from_properties(
    props: &vk::PhysicalDeviceMemoryProperties,
    type_bits: u32,
    requirements: vk::MemoryPropertyFlags,
) -> Option<u32> {
    props.memory_types[..props.memory_type_count as usize]
        .iter()
        .enumerate()
        .find(|(index, memory_type)| {
            type_bits & (1u32 << index) != 0 && memory_type.property_flags.contains(requirements)
        })
        .map(|(index, _)| index as u32)
}
