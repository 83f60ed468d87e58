/// The embedded sequence programs, one per dispatch slot, listed in id
/// order. The assembler in `seq.rs` lays these out after the pointer
/// header and resolves the named jump targets.
///
/// Conventions worth knowing when editing:
///   - a sequence must emit a frame at least once per loop, or the
///     interpreter's opcode budget trips;
///   - `chy` deltas across an airborne arc must sum to zero unless the
///     sequence ends on a different row (`up`/`dn` move the row, the
///     63-line block height moves the scanline);
///   - landing frames carry `jard` so loose floors underneath wiggle.

use super::seq::{Ins, Seq};

fn p(seq: Seq, code: &[Ins]) -> (Seq, Vec<Ins>) {
    (seq, code.to_vec())
}

pub fn programs() -> Vec<(Seq, Vec<Ins>)> {
    use Ins::*;
    use Seq::*;

    vec![
        p(StartRun, &[Act(1), Cx(1), Fr(1), Cx(2), Fr(2), Cx(3), Fr(3), Go(Running)]),
        p(Stand, &[Act(0), Fr(15), Go(Stand)]),
        p(
            StandJump,
            &[
                Act(1),
                Cx(1), Fr(16),
                Cx(2), Fr(17),
                Cx(3), Fr(18),
                Cx(4), Fr(19),
                Cx(5), Cy(-6), Fr(20),
                Cx(5), Cy(-5), Fr(21),
                Cx(4), Cy(-3), Fr(22),
                Cx(4), Cy(2), Fr(23),
                Cx(3), Cy(4), Fr(24),
                Cx(3), Cy(8), Fr(25),
                Cx(2), Fr(26),
                JarD,
                Cx(1), Fr(27),
                Fr(28),
                Go(Stand),
            ],
        ),
        p(
            RunJump,
            &[
                Act(1),
                Cx(4), Fr(34),
                Cx(4), Fr(35),
                Cx(3), Fr(36),
                Cx(3), Fr(37),
                Cx(5), Cy(-4), Fr(38),
                Cx(6), Cy(-3), Fr(39),
                Cx(6), Cy(-2), Fr(40),
                Cx(6), Cy(2), Fr(41),
                Cx(5), Cy(3), Fr(42),
                Cx(4), Cy(4), Fr(43),
                Cx(4), Fr(44),
                JarD,
                Cx(3),
                Go(Running),
            ],
        ),
        p(
            Turn,
            &[
                Act(1),
                Flip,
                Cx(1), Fr(45),
                Cx(1), Fr(46),
                Fr(47),
                Fr(48),
                Fr(50),
                Fr(51),
                Fr(52),
                Go(Stand),
            ],
        ),
        p(
            RunTurn,
            &[Act(1), Cx(1), Fr(45), Fr(46), Flip, Fr(47), Cx(1), Fr(48), Go(Running)],
        ),
        p(
            StepFall,
            &[Act(3), Fall(0, 0), IfW(FreeFall), Cy(2), Fr(102), Cy(3), Fr(103), Go(FreeFall)],
        ),
        p(
            JumpHangMed,
            &[
                Act(1),
                Fr(67),
                Fr(68),
                Fr(69),
                Cy(-6), Fr(70),
                Cy(-8), Fr(71),
                Cy(-6), Fr(72),
                Cy(4), Fr(73),
                Cy(8), Fr(74),
                Cy(8), Fr(75),
                Act(2),
                Fr(87),
                Go(Hang),
            ],
        ),
        p(
            Hang,
            &[
                Act(2),
                Fr(87), Fr(88), Fr(89), Fr(90), Fr(91), Fr(92), Fr(93), Fr(94),
                Fr(93), Fr(92), Fr(91), Fr(90), Fr(89), Fr(88),
                Go(Hang),
            ],
        ),
        p(
            ClimbUp,
            &[
                Act(1),
                Cx(1), Cy(-10), Fr(126),
                Cx(1), Cy(-10), Fr(127),
                Cx(1), Cy(-10), Fr(128),
                Cy(-10), Fr(129),
                Cy(-10), Fr(130),
                Up,
                Cy(-13), Fr(131),
                Cx(1), Fr(132),
                Fr(133),
                Fr(134),
                Go(StandUp),
            ],
        ),
        p(HangDrop, &[Act(1), Fr(100), Fr(101), JarD, Fr(109), Go(StandUp)]),
        p(HangFall, &[Act(4), Fall(0, 0), Fr(100), Fr(101), Go(FreeFall)]),
        p(FreeFall, &[Act(4), Fr(106), Fr(107), Fr(108), Go(FreeFall)]),
        p(RunStop, &[Act(1), Cx(3), Fr(55), Cx(2), Fr(56), Cx(1), Fr(57), Go(Stand)]),
        p(
            JumpUp,
            &[
                Act(1),
                Fr(67),
                Fr(68),
                Fr(69),
                Cy(-4), Fr(70),
                Cy(-2), Fr(71),
                JarU,
                Cy(2), Fr(72),
                Cy(4), Fr(73),
                Fr(76),
                Go(Stand),
            ],
        ),
        p(FallHang, &[Fall(0, 0), Act(2), Fr(87), Go(Hang)]),
        p(
            JumpBackHang,
            &[
                Act(1),
                Fr(67),
                Fr(68),
                Cy(-6), Fr(70),
                Flip,
                Cx(1),
                Cy(-8), Fr(71),
                Cy(-6), Fr(72),
                Cy(4), Fr(73),
                Cy(8), Fr(74),
                Cy(8), Fr(75),
                Act(2),
                Fr(87),
                Go(Hang),
            ],
        ),
        p(SoftLand, &[Act(1), JarD, Fr(203), Fr(204), Go(Stand)]),
        p(
            JumpFall,
            &[Act(3), Fall(2, 2), Cx(2), Cy(2), Fr(104), Cx(1), Cy(3), Fr(105), Go(FreeFall)],
        ),
        p(
            StepFall2,
            &[Act(3), Cx(-2), Fall(0, 0), Cy(2), Fr(102), Cy(3), Fr(103), Go(FreeFall)],
        ),
        p(
            MedLand,
            &[Act(1), JarD, Fr(203), Fr(109), Fr(109), Fr(109), Go(StandUp)],
        ),
        p(
            RJumpFall,
            &[Act(3), Fall(3, 3), Cx(3), Cy(3), Fr(104), Cx(2), Cy(4), Fr(105), Go(FreeFall)],
        ),
        p(
            HardLand,
            &[Act(5), JarD, Fr(186), Fr(187), Die, Fr(188), Fr(189), Go(Dead)],
        ),
        p(HangStraight, &[Act(6), Fr(95), Fr(96), Fr(97), Fr(96), Go(HangStraight)]),
        p(TurnRun, &[Act(1), Cx(1), Fr(52), Go(Running)]),
        p(
            Running,
            &[
                Act(1),
                Cx(2), Fr(4),
                Cx(2), Fr(5),
                Cx(2), Fr(6),
                Cx(2), Fr(7),
                Cx(2), Fr(8),
                Cx(2), Fr(9),
                Cx(2), Fr(10),
                Cx(2), Fr(11),
                Cx(2), Fr(12),
                Cx(2), Fr(13),
                Cx(2), Fr(14),
                Go(Running),
            ],
        ),
        p(Stoop, &[Act(1), Fr(29), Fr(30), Fr(109), Go(CrouchHold)]),
        p(
            Crawl,
            &[Act(1), Cx(2), Fr(110), Cx(3), Fr(111), Cx(3), Fr(112), Cx(2), Fr(113), Go(CrouchHold)],
        ),
        p(Step1, &[Act(1), Cx(1), Fr(58), Fr(65), Fr(66), Go(Stand)]),
        p(Step2, &[Act(1), Cx(1), Fr(58), Cx(1), Fr(59), Fr(65), Fr(66), Go(Stand)]),
        p(
            Step3,
            &[Act(1), Cx(1), Fr(58), Cx(1), Fr(59), Cx(1), Fr(60), Fr(65), Fr(66), Go(Stand)],
        ),
        p(
            Step4,
            &[
                Act(1),
                Cx(1), Fr(58), Cx(1), Fr(59), Cx(1), Fr(60), Cx(1), Fr(61),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step5,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(1), Fr(59), Cx(1), Fr(60), Cx(1), Fr(61),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step6,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(2), Fr(59), Cx(1), Fr(60), Cx(1), Fr(61),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step7,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(2), Fr(59), Cx(2), Fr(60), Cx(1), Fr(61),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step8,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(2), Fr(59), Cx(2), Fr(60), Cx(2), Fr(61),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step9,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(2), Fr(59), Cx(2), Fr(60), Cx(2), Fr(61), Cx(1), Fr(62),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step10,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(2), Fr(59), Cx(2), Fr(60), Cx(2), Fr(61), Cx(2), Fr(62),
                Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            Step11,
            &[
                Act(1),
                Cx(2), Fr(58), Cx(2), Fr(59), Cx(2), Fr(60), Cx(2), Fr(61), Cx(2), Fr(62),
                Cx(1), Fr(63),
                Fr(64), Fr(65), Fr(66),
                Go(Stand),
            ],
        ),
        p(
            TestFoot,
            &[Act(1), Cx(1), Fr(81), Fr(82), JarD, Fr(83), Fr(84), Cx(-1), Fr(85), Go(Stand)],
        ),
        p(
            StandUp,
            &[Act(1), Fr(114), Fr(115), Fr(116), Fr(117), Fr(118), Go(Stand)],
        ),
        p(CrouchHold, &[Act(1), Fr(109), Go(CrouchHold)]),
        p(
            DiveRoll,
            &[
                Act(1),
                Cx(3), Fr(213), Cx(4), Fr(214), Cx(4), Fr(215), Cx(3), Fr(216),
                Fr(109),
                Go(CrouchHold),
            ],
        ),
        p(
            ClimbDown,
            &[
                Act(1),
                Fr(119),
                Cx(-1), Fr(120),
                Cx(-2), Fr(121),
                Cy(13), Fr(122),
                Dn,
                Cy(10), Fr(123),
                Cy(10), Fr(124),
                Cy(10), Fr(125),
                Cy(10), Fr(98),
                Cy(10), Fr(99),
                Act(2),
                Go(Hang),
            ],
        ),
        p(
            ClimbFail,
            &[
                Act(2),
                Cy(-4), Fr(126),
                Cy(-2), Fr(127),
                Cy(2), Fr(127),
                Cy(4), Fr(126),
                Fr(87),
                Go(Hang),
            ],
        ),
        p(
            ClimbStairs,
            &[
                Act(5),
                Cx(2), Fr(135),
                Cx(3), Cy(-2), Fr(136),
                Cx(3), Cy(-3), Fr(137),
                Cx(2), Cy(-4), Fr(138),
                Cx(2), Cy(-3), Fr(139),
                Cx(1), Cy(-2), Fr(140),
                Next,
                Go(StairsTop),
            ],
        ),
        p(StairsTop, &[Act(5), Fr(140), Go(StairsTop)]),
        p(
            PickUpSword,
            &[Act(1), Fr(141), Tap(2), Fr(142), Fx(1), Fr(143), Fr(144), Fr(145), Go(Stand)],
        ),
        p(
            DrinkPotion,
            &[
                Act(1),
                Fr(190), Fr(191), Fr(192), Fr(193), Fr(194), Fr(195),
                Fx(1),
                Fr(196), Fr(197), Fr(198), Fr(199), Fr(200), Fr(201), Fr(202),
                Go(Stand),
            ],
        ),
        p(
            JumpHangLong,
            &[
                Act(1),
                Fr(67),
                Fr(68),
                Cx(1), Fr(69),
                Cx(2), Cy(-6), Fr(70),
                Cx(2), Cy(-8), Fr(71),
                Cx(1), Cy(-6), Fr(72),
                Cy(4), Fr(73),
                Cy(8), Fr(74),
                Cy(8), Fr(75),
                Act(2),
                Fr(87),
                Go(Hang),
            ],
        ),
        p(
            HighJump,
            &[
                Act(1),
                Fr(67),
                Fr(68),
                Fr(69),
                IfW(SuperHighJump),
                Cy(-6), Fr(70),
                Cy(-8), Fr(71),
                Cy(-4), Fr(77),
                Cy(4), Fr(78),
                Cy(8), Fr(79),
                Cy(6), Fr(80),
                Fr(76),
                Go(Stand),
            ],
        ),
        p(PatchFall, &[Act(3), Cx(-7), Fall(0, 0), Cy(2), Fr(102), Go(FreeFall)]),
        p(Dead, &[Act(5), Fr(185), Go(Dead)]),
        p(
            DropDead,
            &[Act(5), Die, Fr(186), Fr(187), Fr(188), Fr(189), Go(Dead)],
        ),
        p(Impaled, &[Act(5), Die, Fr(207), Go(ImpaledStill)]),
        p(ImpaledStill, &[Act(5), Fr(207), Go(ImpaledStill)]),
        p(Halved, &[Act(5), Die, Fr(208), Go(HalvedStill)]),
        p(HalvedStill, &[Act(5), Fr(208), Go(HalvedStill)]),
        p(GuardEngarde, &[Act(1), Fr(150), Fr(151), Fr(152), Go(GuardStand)]),
        p(
            GuardStand,
            &[Act(1), Fr(153), Fr(154), Fr(153), Fr(152), Go(GuardStand)],
        ),
        p(
            GuardAdvance,
            &[Act(1), Cx(2), Fr(155), Cx(2), Fr(156), Cx(2), Fr(157), Go(GuardStand)],
        ),
        p(
            GuardRetreat,
            &[Act(1), Cx(-2), Fr(158), Cx(-2), Fr(159), Go(GuardStand)],
        ),
        p(
            GuardStrike,
            &[Act(1), Fr(160), Fr(161), Tap(1), Fr(162), Fr(163), Fr(164), Go(GuardStand)],
        ),
        p(GuardBlock, &[Act(1), Fr(165), Fr(166), Fr(167), Go(GuardStand)]),
        p(GuardStruck, &[Act(1), Cx(-1), Fr(168), Fr(169), Go(GuardStand)]),
        p(
            GuardDie,
            &[Act(5), Die, Fr(186), Fr(187), Fr(188), Fr(189), Go(Dead)],
        ),
        p(MouseClimb, &[Act(1), Fr(217), Fr(218), Go(MouseClimb)]),
        p(MouseLeave, &[Act(1), Fr(219), Fr(220), Flip, Go(MouseClimb)]),
        p(AlertStand, &[Act(1), Fr(166), Go(AlertStand)]),
        p(TurnDraw, &[Act(1), Flip, Fr(150), Fr(151), Go(StandEngarde)]),
        p(
            Resheathe,
            &[Act(1), Fr(172), Fr(173), Fr(174), Fr(175), Go(Stand)],
        ),
        p(FastSheathe, &[Act(1), Fr(172), Fr(175), Go(Stand)]),
        p(
            StepBack,
            &[Act(1), Cx(-2), Fr(158), Cx(-3), Fr(159), Go(StandEngarde)],
        ),
        p(
            Flee,
            &[Act(7), Flip, Cx(3), Fr(155), Cx(3), Fr(156), Go(Running)],
        ),
        p(TurnToFlee, &[Act(7), Flip, Fr(157), Go(Running)]),
        p(
            StrikeAdvance,
            &[Act(1), Cx(2), Fr(160), Cx(1), Fr(161), Go(ReadyStrike)],
        ),
        p(
            StrikeRetreat,
            &[Act(1), Cx(-2), Fr(160), Cx(-1), Fr(161), Go(StandEngarde)],
        ),
        p(ReadyBlock, &[Act(1), Fr(165), Fr(166), Go(StandEngarde)]),
        p(BlockToStrike, &[Act(1), Fr(167), Fr(162), Go(ReadyStrike)]),
        p(ReadyStrike, &[Act(1), Fr(160), Fr(161), Go(StandEngarde)]),
        p(BlockedStrike, &[Act(1), Fr(163), Fr(165), Go(StandEngarde)]),
        p(
            LandEngarde,
            &[Act(1), JarD, Fr(150), Fr(151), Go(StandEngarde)],
        ),
        p(BumpEngardeFwd, &[Act(1), Cx(-1), Fr(158), Go(StandEngarde)]),
        p(
            BumpEngardeBack,
            &[Act(1), Cx(-4), Fr(158), Fr(159), Go(StandEngarde)],
        ),
        p(
            Stabbed,
            &[Act(5), Cx(-1), Fr(168), Cx(-1), Fr(169), Go(StandEngarde)],
        ),
        p(StabKill, &[Act(5), Go(DropDead)]),
        p(Bump, &[Act(5), Cx(-3), Fr(50), Fr(15), Go(Stand)]),
        p(BumpFall, &[Act(4), Cx(-2), Fall(0, 0), Fr(106), Go(FreeFall)]),
        p(VizierStand, &[Act(1), Fr(221), Go(VizierStand)]),
        p(
            VizierWalk,
            &[Act(1), Cx(2), Fr(222), Cx(2), Fr(223), Go(VizierWalk)],
        ),
        p(VizierStop, &[Act(1), Fr(224), Go(VizierStand)]),
        p(
            VizierExit,
            &[Act(1), Cx(3), Fr(223), Cx(3), Fr(222), Go(VizierStand)],
        ),
        p(VizierRaise, &[Act(1), Fr(225), Fr(226), Go(VizierStand)]),
        p(PrincessStand, &[Act(1), Fr(229), Go(PrincessStand)]),
        p(PrincessAlert, &[Act(1), Fr(230), Go(PrincessStand)]),
        p(
            PrincessStepBack,
            &[Act(1), Cx(-2), Fr(231), Go(PrincessStand)],
        ),
        p(PrincessLookDown, &[Act(1), Fr(232), Go(PrincessStand)]),
        p(
            PrincessEmbrace,
            &[Act(1), Cx(1), Fr(233), Fr(234), Go(PrincessStand)],
        ),
        p(PrincessStroke, &[Act(1), Fr(235), Go(PrincessStand)]),
        p(PrincessLie, &[Act(5), Fr(236), Go(PrincessLie)]),
        p(
            PrincessWaiting,
            &[Act(1), Fr(229), Fr(230), Go(PrincessWaiting)],
        ),
        p(MouseRaise, &[Act(1), Fr(217), Fr(219), Go(MouseStand)]),
        p(MouseStand, &[Act(1), Fr(219), Go(MouseStand)]),
        p(
            MouseCrawl,
            &[Act(1), Cx(2), Fr(217), Cx(2), Fr(218), Go(MouseCrawl)],
        ),
        p(GuardAlert, &[Act(1), Fr(152), Fr(151), Go(GuardEngarde)]),
        p(GuardBumpFwd, &[Act(1), Cx(2), Fr(155), Go(GuardStand)]),
        p(GuardBumpBack, &[Act(1), Cx(-2), Fr(158), Go(GuardStand)]),
        p(
            GuardStabbed,
            &[Act(1), Cx(-3), Fr(168), Fr(169), Fr(169), Go(GuardStand)],
        ),
        p(
            GuardFlee,
            &[Act(1), Flip, Cx(3), Fr(155), Cx(3), Fr(156), Cx(3), Fr(157), Go(GuardStand)],
        ),
        p(
            SuperHighJump,
            &[
                Act(1),
                Cy(-8), Fr(71),
                Cy(-10), Fr(72),
                Cy(-6), Fr(77),
                Cy(-2), Fr(78),
                Cy(2), Fr(79),
                Cy(6), Fr(80),
                Cy(10), Fr(80),
                Cy(8), Fr(76),
                Go(Stand),
            ],
        ),
        p(CrawlStop, &[Act(1), Fr(113), Fr(109), Go(CrouchHold)]),
        p(Slump, &[Act(5), Fr(185), Go(Slump)]),
        p(
            PrincessRun,
            &[Act(1), Cx(3), Fr(237), Cx(3), Fr(238), Go(PrincessRun)],
        ),
        p(StandEngarde, &[Act(1), Fr(152), Fr(153), Go(StandEngarde)]),
    ]
}
