/**
 * This module contains all logic for loading texture assets from external
 * files, including the mip-chain generation for texture-array sources.
 */
pub mod texture;
