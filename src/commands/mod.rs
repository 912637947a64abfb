// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod students;
pub mod payments;
pub mod history;
pub mod reversals;
pub mod lookups;
pub mod settings;
pub mod doctor;
